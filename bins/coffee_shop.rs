mod launcher;

fn main() -> std::process::ExitCode {
    launcher::launch("coffee_shop", server::run_coffee_shop)
}

mod launcher;

fn main() -> std::process::ExitCode {
    launcher::launch("trivia", server::run_trivia)
}

//! Create `Venue`, `Artist` and `Show` tables with scalar-text `genres`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Venue::Table)
                    .if_not_exists()
                    .col(pk_auto(Venue::Id))
                    .col(string(Venue::Name).not_null())
                    .col(string_len_null(Venue::City, 120))
                    .col(string_len_null(Venue::State, 120))
                    .col(string_len_null(Venue::Address, 120))
                    .col(string_len_null(Venue::Phone, 120))
                    .col(string_null(Venue::Genres))
                    .col(string_len_null(Venue::ImageLink, 500))
                    .col(string_len_null(Venue::FacebookLink, 120))
                    .col(string_len_null(Venue::Website, 120))
                    .col(boolean(Venue::SeekingTalent).default(false))
                    .col(string_null(Venue::SeekingDescription))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Artist::Table)
                    .if_not_exists()
                    .col(pk_auto(Artist::Id))
                    .col(string(Artist::Name).not_null())
                    .col(string_len_null(Artist::City, 120))
                    .col(string_len_null(Artist::State, 120))
                    .col(string_len_null(Artist::Phone, 120))
                    .col(string_null(Artist::Genres))
                    .col(string_len_null(Artist::ImageLink, 500))
                    .col(string_len_null(Artist::FacebookLink, 120))
                    .col(string_len_null(Artist::Website, 120))
                    .col(boolean(Artist::SeekingVenue).default(false))
                    .col(string_null(Artist::SeekingDescription))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Show::Table)
                    .if_not_exists()
                    .col(pk_auto(Show::Id))
                    .col(integer(Show::ArtistId).not_null())
                    .col(integer(Show::VenueId).not_null())
                    .col(timestamp(Show::StartTime).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_show_artist")
                            .from(Show::Table, Show::ArtistId)
                            .to(Artist::Table, Artist::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_show_venue")
                            .from(Show::Table, Show::VenueId)
                            .to(Venue::Table, Venue::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Show::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Artist::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Venue::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Venue {
    #[sea_orm(iden = "Venue")]
    Table,
    Id,
    Name,
    City,
    State,
    Address,
    Phone,
    Genres,
    ImageLink,
    FacebookLink,
    Website,
    SeekingTalent,
    SeekingDescription,
}

#[derive(DeriveIden)]
enum Artist {
    #[sea_orm(iden = "Artist")]
    Table,
    Id,
    Name,
    City,
    State,
    Phone,
    Genres,
    ImageLink,
    FacebookLink,
    Website,
    SeekingVenue,
    SeekingDescription,
}

#[derive(DeriveIden)]
enum Show {
    #[sea_orm(iden = "Show")]
    Table,
    Id,
    ArtistId,
    VenueId,
    StartTime,
}

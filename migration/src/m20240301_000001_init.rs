use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Manufacturer {
    Table,
    Id,
    Name,
    Country,
}

#[derive(DeriveIden)]
enum Driver {
    Table,
    Id,
    DateJoined,
    LastLogin,
    Username,
    Password,
    FirstName,
    LastName,
    LicenseNumber,
}

#[derive(DeriveIden)]
enum Car {
    Table,
    Id,
    Model,
    ManufacturerId,
}

#[derive(DeriveIden)]
enum CarDrivers {
    Table,
    CarId,
    DriverId,
}

#[derive(DeriveIden)]
enum Session {
    Table,
    SessionToken,
    CreatedAt,
    ExpiresAt,
    UserAgent,
    NumVisits,
    DriverId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Manufacturer::Table)
                    .col(
                        ColumnDef::new(Manufacturer::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Manufacturer::Name)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Manufacturer::Country)
                            .string_len(255)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Driver::Table)
                    .col(
                        ColumnDef::new(Driver::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Driver::DateJoined)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Driver::LastLogin).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(Driver::Username)
                            .string_len(150)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Driver::Password).string_len(255).not_null())
                    .col(ColumnDef::new(Driver::FirstName).string_len(150).not_null())
                    .col(ColumnDef::new(Driver::LastName).string_len(150).not_null())
                    .col(
                        ColumnDef::new(Driver::LicenseNumber)
                            .string_len(255)
                            .null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Car::Table)
                    .col(
                        ColumnDef::new(Car::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Car::Model).string_len(255).not_null())
                    .col(ColumnDef::new(Car::ManufacturerId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("car_manufacturer_id_fkey")
                            .from(Car::Table, Car::ManufacturerId)
                            .to(Manufacturer::Table, Manufacturer::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("car_manufacturer_id_idx")
                    .table(Car::Table)
                    .col(Car::ManufacturerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CarDrivers::Table)
                    .col(ColumnDef::new(CarDrivers::CarId).integer().not_null())
                    .col(ColumnDef::new(CarDrivers::DriverId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(CarDrivers::CarId)
                            .col(CarDrivers::DriverId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("car_drivers_car_id_fkey")
                            .from(CarDrivers::Table, CarDrivers::CarId)
                            .to(Car::Table, Car::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("car_drivers_driver_id_fkey")
                            .from(CarDrivers::Table, CarDrivers::DriverId)
                            .to(Driver::Table, Driver::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Session::Table)
                    .col(
                        ColumnDef::new(Session::SessionToken)
                            .binary()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Session::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Session::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Session::UserAgent).text().not_null())
                    .col(
                        ColumnDef::new(Session::NumVisits)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Session::DriverId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("session_driver_id_fkey")
                            .from(Session::Table, Session::DriverId)
                            .to(Driver::Table, Driver::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Session::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CarDrivers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Car::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Driver::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Manufacturer::Table).to_owned())
            .await
    }
}

//! Driver command handlers.

use tabled::Tabled;

use fleetdesk_core::{Driver, EntityId, Fleet};

use crate::cli::{DriverFields, DriversArgs, DriversCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct DriverRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "License")]
    license: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Truck")]
    truck: String,
}

impl From<&Driver> for DriverRow {
    fn from(d: &Driver) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.name.clone(),
            license: d.license_number.clone(),
            phone: output::optional(d.phone_number.as_deref()),
            status: d.status.clone(),
            truck: output::reference(d.assigned_truck_id.as_ref()),
        }
    }
}

fn detail(d: &Driver) -> String {
    output::detail_block(&[
        ("ID:", d.id.to_string()),
        ("Name:", d.name.clone()),
        ("License:", d.license_number.clone()),
        ("Phone:", output::optional(d.phone_number.as_deref())),
        ("Born:", output::optional(d.date_of_birth.as_deref())),
        ("Status:", d.status.clone()),
        ("Truck:", output::reference(d.assigned_truck_id.as_ref())),
    ])
}

impl DriverFields {
    fn apply(self, driver: &mut Driver) {
        if let Some(v) = self.name {
            driver.name = v;
        }
        if let Some(v) = self.license_number {
            driver.license_number = v;
        }
        if let Some(v) = self.phone_number {
            driver.phone_number = Some(v);
        }
        if let Some(v) = self.date_of_birth {
            driver.date_of_birth = Some(v);
        }
        if let Some(v) = self.status {
            driver.status = v;
        }
    }
}

fn file_record(fields: &mut DriverFields) -> Result<Option<Driver>, CliError> {
    fields
        .from_file
        .take()
        .map(|path| util::read_json_file(&path))
        .transpose()
}

fn print_list(drivers: &[Driver], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        drivers,
        |d| DriverRow::from(d),
        |d| d.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn print_driver(driver: &Driver, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, driver, detail, |d| d.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(
    fleet: &Fleet,
    args: DriversArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        DriversCommand::List => {
            let drivers = util::fetch_all(fleet.drivers()).await?;
            print_list(&drivers, global)
        }

        DriversCommand::Available => {
            let mut drivers = util::fetch_all(fleet.drivers()).await?;
            drivers.retain(Driver::is_available);
            print_list(&drivers, global)
        }

        DriversCommand::Get { id } => {
            let driver = util::find_by_id(fleet.drivers(), &id).await?;
            print_driver(&driver, global)
        }

        DriversCommand::Create(mut fields) => {
            let seed = file_record(&mut fields)?;
            let form = fleet.driver_form();
            form.open_create();
            form.edit(|draft| {
                if let Some(seed) = seed {
                    *draft = Driver {
                        id: EntityId::unsaved(),
                        ..seed
                    };
                }
                fields.apply(draft);
            });

            let saved = util::submit(form).await?;
            output::success(&format!("Driver created: {}", saved.id), color, global.quiet);
            print_driver(&saved, global)
        }

        DriversCommand::Update { id, mut fields } => {
            let seed = file_record(&mut fields)?;
            let existing = util::find_by_id(fleet.drivers(), &id).await?;
            let form = fleet.driver_form();
            form.open_edit(&existing);
            form.edit(|draft| {
                if let Some(seed) = seed {
                    *draft = Driver {
                        id: existing.id.clone(),
                        ..seed
                    };
                }
                fields.apply(draft);
            });

            let saved = util::submit(form).await?;
            output::success(&format!("Driver updated: {id}"), color, global.quiet);
            print_driver(&saved, global)
        }

        DriversCommand::Delete { id } => {
            if !util::confirm(&format!("Delete driver {id}?"), "drivers delete", global.yes)? {
                eprintln!("Aborted");
                return Ok(());
            }
            util::delete(fleet.drivers(), &id).await?;
            output::success(&format!("Driver deleted: {id}"), color, global.quiet);
            Ok(())
        }
    }
}

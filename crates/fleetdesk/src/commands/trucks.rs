//! Truck command handlers.

use tabled::Tabled;

use fleetdesk_core::{AssignOutcome, AssignmentStatus, Dimensions, EntityId, Fleet, Truck};

use crate::cli::{GlobalOpts, TruckFields, TrucksArgs, TrucksCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct TruckRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Plate")]
    plate: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Type")]
    truck_type: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Load")]
    load: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Driver")]
    driver: String,
}

impl From<&Truck> for TruckRow {
    fn from(t: &Truck) -> Self {
        Self {
            id: t.id.to_string(),
            plate: t.license_plate.clone(),
            color: t.color.clone(),
            truck_type: output::optional(t.truck_type.as_deref()),
            status: t.status.clone(),
            load: format!("{}/{}", t.current_load, t.max_load_capacity),
            location: t.location.clone(),
            driver: output::reference(t.driver_id.as_ref()),
        }
    }
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

fn detail(t: &Truck) -> String {
    let dims = t.dimensions.unwrap_or_default();
    output::detail_block(&[
        ("ID:", t.id.to_string()),
        ("License Plate:", t.license_plate.clone()),
        ("Color:", t.color.clone()),
        ("Status:", t.status.clone()),
        ("Type:", output::optional(t.truck_type.as_deref())),
        ("Driver:", output::reference(t.driver_id.as_ref())),
        ("Location:", t.location.clone()),
        ("Max Load:", t.max_load_capacity.to_string()),
        ("Current Load:", t.current_load.to_string()),
        ("Fuel Type:", output::optional(t.fuel_type.as_deref())),
        ("Fuel Capacity:", number(t.fuel_capacity)),
        ("Fuel Level:", number(t.current_fuel_level)),
        (
            "Dimensions:",
            format!(
                "{} x {} x {}",
                number(dims.length),
                number(dims.width),
                number(dims.height)
            ),
        ),
        ("Registered:", output::optional(t.registration_date.as_deref())),
        (
            "Next Service:",
            output::optional(t.next_maintenance_date.as_deref()),
        ),
        ("Odometer:", number(t.odometer_reading)),
    ])
}

// ── Field overlay ───────────────────────────────────────────────────

impl TruckFields {
    /// Overwrite every attribute given on the command line; leave the rest.
    fn apply(self, truck: &mut Truck) {
        if let Some(v) = self.license_plate {
            truck.license_plate = v;
        }
        if let Some(v) = self.color {
            truck.color = v;
        }
        if let Some(v) = self.max_load_capacity {
            truck.max_load_capacity = v;
        }
        if let Some(v) = self.current_load {
            truck.current_load = v;
        }
        if let Some(v) = self.truck_type {
            truck.truck_type = Some(v);
        }
        if let Some(v) = self.fuel_type {
            truck.fuel_type = Some(v);
        }
        if let Some(v) = self.fuel_capacity {
            truck.fuel_capacity = Some(v);
        }
        if let Some(v) = self.current_fuel_level {
            truck.current_fuel_level = Some(v);
        }
        if self.length.is_some() || self.width.is_some() || self.height.is_some() {
            let dims = truck.dimensions.get_or_insert_with(Dimensions::default);
            dims.length = self.length.or(dims.length);
            dims.width = self.width.or(dims.width);
            dims.height = self.height.or(dims.height);
        }
        if let Some(v) = self.registration_date {
            truck.registration_date = Some(v);
        }
        if let Some(v) = self.next_maintenance_date {
            truck.next_maintenance_date = Some(v);
        }
        if let Some(v) = self.status {
            truck.status = v;
        }
        if let Some(v) = self.odometer_reading {
            truck.odometer_reading = Some(v);
        }
        if let Some(v) = self.location {
            truck.location = v;
        }
    }
}

/// Record from `--from-file`, if one was given.
fn file_record(fields: &mut TruckFields) -> Result<Option<Truck>, CliError> {
    fields
        .from_file
        .take()
        .map(|path| util::read_json_file(&path))
        .transpose()
}

fn print_truck(truck: &Truck, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, truck, detail, |t| t.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    fleet: &Fleet,
    args: TrucksArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        TrucksCommand::List => {
            let trucks = util::fetch_all(fleet.trucks()).await?;
            let out = output::render_list(
                &global.output,
                &trucks,
                |t| TruckRow::from(t),
                |t| t.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TrucksCommand::Get { id } => {
            let truck = util::find_by_id(fleet.trucks(), &id).await?;
            print_truck(&truck, global)
        }

        TrucksCommand::Create(mut fields) => {
            let seed = file_record(&mut fields)?;
            let form = fleet.truck_form();
            form.open_create();
            form.edit(|draft| {
                if let Some(seed) = seed {
                    *draft = Truck {
                        id: EntityId::unsaved(),
                        ..seed
                    };
                }
                fields.apply(draft);
            });

            let saved = util::submit(form).await?;
            output::success(&format!("Truck created: {}", saved.id), color, global.quiet);
            print_truck(&saved, global)
        }

        TrucksCommand::Update { id, mut fields } => {
            let seed = file_record(&mut fields)?;
            let existing = util::find_by_id(fleet.trucks(), &id).await?;
            let form = fleet.truck_form();
            form.open_edit(&existing);
            form.edit(|draft| {
                if let Some(seed) = seed {
                    *draft = Truck {
                        id: existing.id.clone(),
                        ..seed
                    };
                }
                fields.apply(draft);
            });

            let saved = util::submit(form).await?;
            output::success(&format!("Truck updated: {id}"), color, global.quiet);
            print_truck(&saved, global)
        }

        TrucksCommand::Delete { id } => {
            if !util::confirm(&format!("Delete truck {id}?"), "trucks delete", global.yes)? {
                eprintln!("Aborted");
                return Ok(());
            }
            util::delete(fleet.trucks(), &id).await?;
            output::success(&format!("Truck deleted: {id}"), color, global.quiet);
            Ok(())
        }

        TrucksCommand::Assign { truck, driver } => {
            assign(fleet, &truck.into(), &driver.into(), global).await
        }
    }
}

/// Open an assignment session for `truck_id`, check `driver_id` against
/// the candidates, then link them.
async fn assign(
    fleet: &Fleet,
    truck_id: &EntityId,
    driver_id: &EntityId,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let assignment = fleet.assignment();

    let candidates = match assignment.open(truck_id).await {
        Ok(candidates) => candidates,
        Err(err) => {
            assignment.dismiss();
            return Err(CliError::operation("Failed to fetch drivers", err));
        }
    };

    if !driver_id.is_unsaved() && !candidates.iter().any(|d| &d.id == driver_id) {
        assignment.dismiss();
        let available = candidates
            .iter()
            .map(|d| d.id.to_string())
            .collect::<Vec<_>>();
        return Err(CliError::Validation {
            field: "driver".into(),
            reason: format!(
                "'{driver_id}' is not available (candidates: {})",
                if available.is_empty() {
                    "none".into()
                } else {
                    available.join(", ")
                }
            ),
        });
    }

    assignment.select(driver_id);
    match assignment.assign_selected().await {
        Ok(AssignOutcome::Assigned(updated)) => {
            output::success(
                &format!("Driver {driver_id} assigned to truck {truck_id}"),
                output::should_color(&global.color),
                global.quiet,
            );
            match updated {
                Some(truck) => print_truck(&truck, global),
                None => Ok(()),
            }
        }
        Ok(AssignOutcome::NothingSelected) => {
            assignment.dismiss();
            eprintln!("No driver selected; nothing was sent");
            Ok(())
        }
        Err(err) => {
            let message = match assignment.state().status {
                AssignmentStatus::Failed(message) => message,
                _ => "Failed to assign driver.".into(),
            };
            assignment.dismiss();
            Err(CliError::operation(message, err))
        }
    }
}

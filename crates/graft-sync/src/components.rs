//! Parsed components into the component store.

use graft_core::{ComponentRecord, ComponentStore, ImportReport, ParsedComponent, StoreResult};
use tracing::{debug, info, warn};

enum Outcome {
    Inserted,
    Updated,
    Unchanged,
}

/// Upsert components by `(project_id, node_id)`.
///
/// A stored record equal to the new one is left alone, so re-importing an unchanged
/// file reports nothing. Store failures are recorded per component.
pub fn store_components<S>(project_id: &str, components: Vec<ParsedComponent>, store: &mut S) -> ImportReport
where
    S: ComponentStore + ?Sized,
{
    let mut report = ImportReport::new();
    for component in components {
        let record = ComponentRecord::from(component);
        let name = record.name.clone();
        let node_id = record.node_id.clone();
        match upsert(project_id, record, store) {
            Ok(Outcome::Inserted) => report.imported.push(name),
            Ok(Outcome::Updated) => report.updated.push(name),
            Ok(Outcome::Unchanged) => debug!(component = name.as_str(), "component unchanged"),
            Err(err) => {
                warn!(component = name.as_str(), node = node_id.as_str(), error = %err, "component import failed");
                report.push_error(name, err);
            }
        }
    }
    info!(
        project = project_id,
        imported = report.imported.len(),
        updated = report.updated.len(),
        errors = report.errors.len(),
        "components imported"
    );
    report
}

fn upsert<S>(project_id: &str, record: ComponentRecord, store: &mut S) -> StoreResult<Outcome>
where
    S: ComponentStore + ?Sized,
{
    match store.find_component(project_id, &record.node_id)? {
        Some(existing) if existing == record => Ok(Outcome::Unchanged),
        Some(_) => {
            store.update_component(project_id, record)?;
            Ok(Outcome::Updated)
        }
        None => {
            store.insert_component(project_id, record)?;
            Ok(Outcome::Inserted)
        }
    }
}

use crate::gesture::config::DEFAULT_MIN_TRAINING_FRAMES;
use crate::store::keys;
use crate::store::operations::gestures::GestureDataset;
use crate::store::{Store, StoreError};

type MigrationFn = fn(&Store) -> Result<(), StoreError>;

fn migrations() -> Vec<(&'static str, MigrationFn)> {
    vec![
        ("001_initial", m001_initial),
        ("002_legacy_datasets", m002_legacy_datasets),
    ]
}

/// Apply every migration newer than the stored schema version.
///
/// Migrations must be idempotent: the version is persisted after each one
/// succeeds, so a crash between the two re-runs the migration on restart.
/// Versions only move forward.
pub fn run(store: &Store) -> Result<(), StoreError> {
    let current = get_current_version(store)?;
    let all = migrations();

    for (index, (name, func)) in all.iter().enumerate() {
        let version = (index + 1) as u32;
        if version > current {
            tracing::info!(version, name, "Running migration");
            func(store)?;
            set_version(store, version)?;
            tracing::info!(version, name, "Migration complete");
        } else {
            tracing::debug!(version, name, "Migration already applied, skipping");
        }
    }

    Ok(())
}

pub fn get_current_version(store: &Store) -> Result<u32, StoreError> {
    match store.meta.get(keys::SCHEMA_VERSION_KEY.as_bytes())? {
        Some(raw) => {
            let bytes: [u8; 4] = raw.as_ref().try_into().map_err(|_| StoreError::Migration {
                version: 0,
                message: format!("schema version has {} bytes, expected 4", raw.len()),
            })?;
            Ok(u32::from_be_bytes(bytes))
        }
        None => Ok(0),
    }
}

pub fn set_version(store: &Store, version: u32) -> Result<(), StoreError> {
    let current = get_current_version(store)?;
    if version < current {
        return Err(StoreError::Migration {
            version,
            message: format!("Refuse to downgrade from {} to {}", current, version),
        });
    }

    store
        .meta
        .insert(keys::SCHEMA_VERSION_KEY.as_bytes(), &version.to_be_bytes())?;
    Ok(())
}

fn m001_initial(_store: &Store) -> Result<(), StoreError> {
    Ok(())
}

/// Split a legacy single-blob dataset array into one record per gesture.
/// The blob is removed in the same step, which keeps a re-run a no-op.
fn m002_legacy_datasets(store: &Store) -> Result<(), StoreError> {
    let Some(raw) = store.meta.get(keys::LEGACY_DATASETS_KEY.as_bytes())? else {
        return Ok(());
    };

    let datasets: Vec<GestureDataset> = Store::deserialize(&raw)?;
    let (valid, blank): (Vec<_>, Vec<_>) = datasets
        .into_iter()
        .partition(|d| !d.name.trim().is_empty());
    if !blank.is_empty() {
        tracing::warn!(count = blank.len(), "Dropping legacy datasets without a name");
    }
    let (valid, short): (Vec<_>, Vec<_>) = valid
        .into_iter()
        .partition(|d| d.frames.len() >= DEFAULT_MIN_TRAINING_FRAMES);
    for dataset in &short {
        tracing::warn!(
            gesture = %dataset.name,
            frame_count = dataset.frames.len(),
            required = DEFAULT_MIN_TRAINING_FRAMES,
            "Dropping legacy dataset below the training minimum"
        );
    }

    let imported = store.import_gestures(valid)?;
    store.meta.remove(keys::LEGACY_DATASETS_KEY.as_bytes())?;
    tracing::info!(count = imported.len(), "Imported legacy gesture datasets");
    Ok(())
}

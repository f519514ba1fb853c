//! Schema upgrades from versioned SQL patch files.
//!
//! Patches live in a directory tree `<from_version>/<to_version>.sql`, both
//! versions written as `MAJOR.MINOR.PATCH`. Every `<from_version>` directory
//! is a patch group for databases at exactly that version. A group may hold
//! several patches; the one with the highest target version is applied, so
//! a combined patch can skip intermediate steps. An empty group is allowed
//! and only matters if it leaves the database at an unusable version.
//!
//! Each patch script has to end with `PRAGMA user_version = <encoded
//! target>` and must not contain transaction statements: the whole upgrade
//! runs in a single transaction and is rolled back on any failure.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Transaction;

use crate::database::CardDatabase;
use crate::error::MigrationError;
use crate::schema::{COMPATIBLE_SCHEMA_VERSIONS, read_schema_version};
use crate::version::{SchemaVersion, integer_to_version};

/// Outcome of [`update_database_schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub initial_version: u64,
    pub final_version: u64,
    pub applied_patches: usize,
}

#[derive(Debug)]
struct Patch {
    target: SchemaVersion,
    path: PathBuf,
}

#[derive(Debug)]
struct PatchGroup {
    source: SchemaVersion,
    patches: Vec<Patch>,
}

/// The patch directory shipped with this crate.
pub fn default_patch_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("sql").join("patches")
}

/// Open a database, upgrade it with the patches in `patch_dir` and check
/// that the result is usable.
pub fn open_migrated(path: &Path, patch_dir: &Path) -> Result<CardDatabase, MigrationError> {
    let mut db = CardDatabase::open(path, false)?;
    update_database_schema(&mut db, patch_dir)?;
    db.validate_schema_version()?;
    Ok(db)
}

/// Upgrade the database schema to the newest version reachable with the
/// patches in `patch_dir`.
///
/// Fails if a patch group above the current version cannot be reached, if a
/// patch does not produce its declared version, or if the final version is
/// outside [`COMPATIBLE_SCHEMA_VERSIONS`]. Nothing is committed on failure.
pub fn update_database_schema(
    db: &mut CardDatabase,
    patch_dir: &Path,
) -> Result<MigrationReport, MigrationError> {
    let groups = discover_patch_groups(patch_dir)?;

    let conn = db.conn_mut()?;
    let initial_version = read_schema_version(conn)?;
    log::info!("Initial database schema version: {}", integer_to_version(initial_version));

    let tx = conn.transaction()?;
    let mut applied_patches = 0;
    for group in &groups {
        if apply_patch_group(&tx, group)? {
            applied_patches += 1;
        }
    }
    log::info!("Number of applied patches: {applied_patches}");

    let final_version = read_schema_version(&tx)?;
    if !COMPATIBLE_SCHEMA_VERSIONS.contains(final_version) {
        let err = MigrationError::MigrationIncomplete {
            found: final_version,
            minimum: COMPATIBLE_SCHEMA_VERSIONS.inclusive_min,
            maximum: COMPATIBLE_SCHEMA_VERSIONS.exclusive_max,
        };
        log::error!("{err}");
        return Err(err);
    }
    tx.commit()?;
    log::info!("Current database schema version: {}", integer_to_version(final_version));

    Ok(MigrationReport {
        initial_version,
        final_version,
        applied_patches,
    })
}

/// Apply the best patch of a group if the database is at the group's
/// version. Returns true if a patch was applied.
fn apply_patch_group(tx: &Transaction<'_>, group: &PatchGroup) -> Result<bool, MigrationError> {
    let current = read_schema_version(tx)?;
    let source = group.source.to_integer()?;
    if current < source {
        let err = MigrationError::MissingPatch {
            group: group.source,
            current,
        };
        log::error!("{err}");
        return Err(err);
    }
    if current > source {
        log::info!("Skipping already applied patch for version {}", group.source);
        return Ok(false);
    }

    let Some(patch) = group.patches.iter().max_by_key(|patch| patch.target) else {
        log::warn!(
            "Found no patch files for current patch level {}. If the whole patch process ends \
             successfully, this message is harmless. Otherwise a required intermediate patch is missing.",
            group.source
        );
        return Ok(false);
    };

    log::info!("Try to apply patch from version {} to {}...", group.source, patch.target);
    log::debug!("Executing SQL script from patch file {}", patch.path.display());
    let script = fs::read_to_string(&patch.path)?;
    tx.execute_batch(&script)?;

    let found = read_schema_version(tx)?;
    if found != patch.target.to_integer()? {
        let err = MigrationError::PatchIntegrity {
            from: group.source,
            to: patch.target,
            found,
        };
        log::error!("{err}");
        return Err(err);
    }
    log::info!("Patch applied successfully.");
    Ok(true)
}

/// List all patch groups in ascending version order. Every directory and
/// patch file name is validated before any patch is read.
fn discover_patch_groups(patch_dir: &Path) -> Result<Vec<PatchGroup>, MigrationError> {
    if !patch_dir.is_dir() {
        log::warn!("Patch directory {} does not exist", patch_dir.display());
        return Ok(Vec::new());
    }

    let mut groups = Vec::new();
    for entry in fs::read_dir(patch_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let source = parse_patch_name(patch_dir, &name)?;
        groups.push(PatchGroup {
            source,
            patches: discover_patches(&entry.path())?,
        });
    }
    groups.sort_by_key(|group| group.source);
    Ok(groups)
}

fn discover_patches(group_dir: &Path) -> Result<Vec<Patch>, MigrationError> {
    let mut patches = Vec::new();
    for entry in fs::read_dir(group_dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "sql") {
            continue;
        }
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let target = parse_patch_name(group_dir, &stem)?;
        patches.push(Patch { target, path });
    }
    Ok(patches)
}

fn parse_patch_name(dir: &Path, name: &str) -> Result<SchemaVersion, MigrationError> {
    name.parse().map_err(|source| {
        let err = MigrationError::InvalidPatchName {
            dir: dir.to_path_buf(),
            name: name.to_string(),
            source,
        };
        log::error!("{err}");
        err
    })
}

//! Type-declaration mining: recover route shapes from a TypeScript source
//! tree by running the external type-checker and parsing its emitted
//! declaration text.
//!
//! The pipeline writes a throwaway `tsconfig.json` into a scratch workspace,
//! invokes `tsc` in declaration-only mode, locates the `.d.ts` file emitted
//! for the target, and hands its text to [`crate::typeparse`]. The workspace
//! is removed afterwards unless `debug` is set.
//!
//! Mining is strictly best-effort. [`mine_route_types`] degrades every
//! failure (bad target, missing toolchain, no declaration, unparseable
//! output) to a warning and `None`, so a broken type-checker setup never
//! takes document generation down with it.

use crate::error::{Error, Result};
use crate::route::ReferenceTable;
use crate::typeparse;
use log::{debug, info, warn};
use serde_json::{json, Value};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use walkdir::WalkDir;

/// Name of the scratch workspace created under the system temp directory.
const WORKSPACE_DIR_NAME: &str = ".openapi-from-routes";

/// Options controlling a mining run.
#[derive(Debug, Clone)]
pub struct MinerOptions {
    /// The `.ts` or `.tsx` file declaring the application instance
    pub target_file: PathBuf,
    /// Narrow the declaration search to this exported binding
    pub instance_name: Option<String>,
    /// Generic type name the application instance is declared with
    pub instance_type: String,
    /// Project root used to resolve the emitted declaration's relative
    /// path; defaults to the current directory
    pub project_root: Option<PathBuf>,
    /// Existing project `tsconfig.json` to extend; defaults to
    /// `<project_root>/tsconfig.json` when that file exists
    pub tsconfig_path: Option<PathBuf>,
    /// Read this declaration file instead of searching the emitted output
    pub output_override: Option<PathBuf>,
    /// Keep the scratch workspace and show type-checker output
    pub debug: bool,
}

impl MinerOptions {
    pub fn new(target_file: impl Into<PathBuf>) -> Self {
        Self {
            target_file: target_file.into(),
            instance_name: None,
            instance_type: "App".to_string(),
            project_root: None,
            tsconfig_path: None,
            output_override: None,
            debug: false,
        }
    }
}

/// Mine route shapes from the target file, degrading all failures to `None`.
pub fn mine_route_types(options: &MinerOptions) -> Option<ReferenceTable> {
    match mine(options) {
        Ok(table) => Some(table),
        Err(err) => {
            warn!("Type mining failed: {}", err);
            None
        }
    }
}

/// Run the full mining pipeline.
///
/// # Errors
///
/// Returns an error when the target is not a TypeScript file, the
/// type-checker cannot be launched, no declaration file is emitted, or the
/// declaration does not contain the expected instance type.
pub fn mine(options: &MinerOptions) -> Result<ReferenceTable> {
    validate_target(&options.target_file)?;

    let workspace = env::temp_dir().join(WORKSPACE_DIR_NAME);
    if workspace.exists() {
        fs::remove_dir_all(&workspace)?;
    }
    fs::create_dir_all(&workspace)?;

    let result = mine_in_workspace(options, &workspace);

    if options.debug {
        info!("Keeping workspace for inspection: {}", workspace.display());
    } else if let Err(err) = fs::remove_dir_all(&workspace) {
        warn!(
            "Could not remove workspace {}: {}",
            workspace.display(),
            err
        );
    }

    result
}

fn mine_in_workspace(options: &MinerOptions, workspace: &Path) -> Result<ReferenceTable> {
    let target = options.target_file.canonicalize()?;
    let project_root = match &options.project_root {
        Some(root) => root.canonicalize()?,
        None => env::current_dir()?,
    };
    let extends = options.tsconfig_path.clone().or_else(|| {
        let candidate = project_root.join("tsconfig.json");
        candidate.exists().then_some(candidate)
    });

    let config = build_tsconfig(&target, extends.as_deref());
    let config_path = workspace.join("tsconfig.json");
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    info!("Running tsc against {}", target.display());
    run_type_checker(&config_path, options.debug)?;

    let declaration_path = locate_declaration(options, workspace, &target, &project_root)?;
    debug!("Reading declaration file {}", declaration_path.display());
    let declaration = fs::read_to_string(&declaration_path)?;

    typeparse::parse_declaration(
        &declaration,
        &options.instance_type,
        options.instance_name.as_deref(),
    )
    .ok_or_else(|| {
        Error::Toolchain(format!(
            "no {} instance found in {}",
            options.instance_type,
            declaration_path.display()
        ))
    })
}

fn validate_target(path: &Path) -> Result<()> {
    let extension = path.extension().and_then(|e| e.to_str());
    if !matches!(extension, Some("ts") | Some("tsx")) {
        return Err(Error::InvalidTarget {
            file: path.to_path_buf(),
            message: "expected a .ts or .tsx file".to_string(),
        });
    }
    if !path.is_file() {
        return Err(Error::InvalidTarget {
            file: path.to_path_buf(),
            message: "file does not exist".to_string(),
        });
    }
    Ok(())
}

/// The throwaway compiler configuration for a declaration-only emit of the
/// target file into the workspace's `dist` directory.
fn build_tsconfig(include: &Path, extends: Option<&Path>) -> Value {
    let mut config = json!({
        "compilerOptions": {
            "lib": ["ESNext"],
            "module": "ESNext",
            "moduleResolution": "bundler",
            "noEmit": false,
            "declaration": true,
            "emitDeclarationOnly": true,
            "skipLibCheck": true,
            "skipDefaultLibCheck": true,
            "outDir": "./dist"
        },
        "include": [include.to_string_lossy()]
    });
    if let Some(extends) = extends {
        config["extends"] = json!(extends.to_string_lossy());
    }
    config
}

fn run_type_checker(config_path: &Path, debug: bool) -> Result<()> {
    let mut command = Command::new("tsc");
    command.arg("-p").arg(config_path);
    if debug {
        command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    } else {
        command.stdout(Stdio::null()).stderr(Stdio::null());
    }

    let status = command
        .status()
        .map_err(|err| Error::Toolchain(format!("could not launch tsc: {}", err)))?;
    if !status.success() {
        // Declarations are often emitted despite type errors; keep going and
        // let the declaration lookup decide.
        warn!("tsc exited with {}; emitted declarations may be partial", status);
    }
    Ok(())
}

/// Candidate declaration paths relative to the emit directory, most
/// specific first. The compiler drops the common leading directory of its
/// include set, so a `src/index.ts` target may land at either
/// `dist/src/index.d.ts` or `dist/index.d.ts`.
fn declaration_relative_paths(relative: &Path) -> Vec<PathBuf> {
    let with_ext = relative.with_extension("d.ts");
    let mut candidates = vec![with_ext.clone()];

    let mut components = with_ext.components();
    if components.next().is_some() {
        let stripped = components.as_path();
        if !stripped.as_os_str().is_empty() {
            candidates.push(stripped.to_path_buf());
        }
    }
    candidates
}

fn locate_declaration(
    options: &MinerOptions,
    workspace: &Path,
    target: &Path,
    project_root: &Path,
) -> Result<PathBuf> {
    if let Some(declaration) = &options.output_override {
        if declaration.is_file() {
            return Ok(declaration.clone());
        }
        return Err(Error::DeclarationMissing {
            expected: declaration.clone(),
        });
    }

    let dist = workspace.join("dist");
    let relative = target.strip_prefix(project_root).unwrap_or(target);

    let mut expected = None;
    for candidate in declaration_relative_paths(relative) {
        let path = dist.join(candidate);
        if path.is_file() {
            return Ok(path);
        }
        if expected.is_none() {
            expected = Some(path);
        }
    }

    // Surface what was actually emitted to make the mismatch debuggable.
    for entry in WalkDir::new(&dist).into_iter().flatten() {
        if entry.file_type().is_file()
            && entry.file_name().to_string_lossy().ends_with(".d.ts")
        {
            warn!("Emitted declaration candidate: {}", entry.path().display());
        }
    }

    Err(Error::DeclarationMissing {
        expected: expected.unwrap_or(dist),
    })
}

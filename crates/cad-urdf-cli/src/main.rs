//! CAD URDF exporter entry point

use std::path::PathBuf;
use std::process::ExitCode;

use cad_urdf::{
    CadDocument, DocumentError, ExportError, ExportOptions, OptionsError, RobotLinkSpec,
    export_robot,
};
use clap::Parser;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Failed to load document: {0}")]
    Document(#[from] DocumentError),
    #[error("Failed to load export options: {0}")]
    Options(#[from] OptionsError),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

/// Export a CAD document snapshot to URDF on stdout
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Document snapshot (RON)
    document: PathBuf,

    /// Export options and joints (RON)
    options: Option<PathBuf>,
}

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Logs go to stderr, stdout only carries the URDF document
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cad_urdf=info,cad_urdf_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&Args::parse()) {
        Ok(urdf) => {
            print!("{urdf}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, CliError> {
    let document = CadDocument::load(&args.document)?;
    tracing::info!(
        "Loaded document \"{}\" ({} objects) from {}",
        document.name,
        document.len(),
        args.document.display()
    );

    let options = match &args.options {
        Some(path) => ExportOptions::load(path)?,
        None => ExportOptions::default(),
    };

    // One URDF link per top-level object
    let links: Vec<RobotLinkSpec> = document
        .roots()
        .iter()
        .filter_map(|id| document.get(*id))
        .map(|object| RobotLinkSpec::from_object(object.label_or_name(), object.id))
        .collect();

    let export = export_robot(&document, &links, &options.joints, &options)?;
    export.validate()?;
    if !export.warnings.is_empty() {
        tracing::warn!("Export finished with {} warning(s)", export.warnings.len());
    }
    for filename in export.mesh_filenames() {
        tracing::info!("Mesh to provide: {}/{}", options.mesh_dir, filename);
    }
    Ok(export.to_urdf_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("cad-urdf").chain(values.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["robot.ron"]);
        assert_eq!(parsed.document, PathBuf::from("robot.ron"));
        assert!(parsed.options.is_none());

        let parsed = args(&["robot.ron", "options.ron"]);
        assert_eq!(parsed.options, Some(PathBuf::from("options.ron")));

        assert!(Args::try_parse_from(["cad-urdf"]).is_err());
        assert!(Args::try_parse_from(["cad-urdf", "a", "b", "c"]).is_err());
        let help = Args::try_parse_from(["cad-urdf", "--help"]).unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_run_exports_roots_and_joints() {
        use cad_urdf::CadObject;

        let temp = tempfile::tempdir().unwrap();
        let document_path = temp.path().join("robot.ron");
        let options_path = temp.path().join("options.ron");
        let mut document = CadDocument::new("robot");
        document.add_root(CadObject::new_box("Box", 100.0, 100.0, 100.0).with_label("base"));
        document.add_root(CadObject::new_mesh("Mesh").with_label("arm"));
        document.save(&document_path).unwrap();
        std::fs::write(
            &options_path,
            "(package_name: Some(\"demo\"), robot_name: \"demo\", joints: [\
             (name: \"shoulder\", joint_type: revolute, parent: Some(\"base\"), \
             child: Some(\"arm\"), effort: 1.0, velocity: 1.0)])",
        )
        .unwrap();

        let urdf = run(&args(&[
            document_path.to_str().unwrap(),
            options_path.to_str().unwrap(),
        ]))
        .unwrap();
        assert!(urdf.contains("<robot name=\"demo\">"));
        assert!(urdf.contains("<link name=\"base\">"));
        assert!(urdf.contains("package://demo/meshes/arm.dae"));
        assert!(urdf.contains("<joint name=\"shoulder\" type=\"revolute\">"));
        assert!(urdf.contains("<parent link=\"base\" />"));
    }

    #[test]
    fn test_run_missing_document() {
        let result = run(&args(&["/nonexistent/robot.ron"]));
        assert!(matches!(result, Err(CliError::Document(DocumentError::Io(_)))));
    }
}

//! Scaffolding new modules: the interactive wizard, the generated
//! `build.gradle`, and registering the module in `settings.gradle`.

use std::{
    collections::HashMap,
    fs::{self, OpenOptions},
    io::{self, BufRead, Write},
    path::{Component, Path},
};

use anyhow::Context;
use argot::{ArgParser, Argument, TypeTag};
use lazy_format::lazy_format;

use crate::{error::Error, paths::replace_placeholders, project::SETTINGS_FILE};

/// Everything the wizard can configure about a new module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleProperties {
    pub has_paper: bool,
    pub version: String,
}

impl Default for ModuleProperties {
    fn default() -> Self {
        Self {
            has_paper: false,
            version: "1.0.0".to_owned(),
        }
    }
}

const BUILD_TEMPLATE: &str = "
/* Init by buildsrc new-module */

plugins {
    // java
    id 'java'
    id 'java-library'

    // package publishing
    id 'maven-publish'
    id 'signing'

    // for shading in dependencies
    id \"com.github.johnrengelman.shadow\" version \"7.1.2\"
${paperPlugin}
}
version '${version}'

ext {
${ext}}

apply from: '${buildsrc}/module.gradle', to: project
";

const PAPER_PLUGIN: &str = "\n\n\tid ('io.papermc.paperweight.userdev') version '1.3.5'";

/// The path from a module directory named `name` back up to the root's
/// `buildsrc` directory, e.g. `../buildsrc` or `../../buildsrc`. `name`
/// has already been through [`check_name`].
fn buildsrc_path(name: &Path) -> String {
    let depth = name
        .components()
        .filter(|component| matches!(component, Component::Normal(_)))
        .count()
        .max(1);

    format!("{}buildsrc", "../".repeat(depth))
}

/// Render the `build.gradle` for a new module called `name`.
pub fn build_gradle(name: &str, props: &ModuleProperties) -> String {
    let vars = HashMap::from([
        (
            "paperPlugin",
            match props.has_paper {
                true => PAPER_PLUGIN.to_owned(),
                false => String::new(),
            },
        ),
        ("version", props.version.clone()),
        (
            "ext",
            match props.has_paper {
                true => "\thasPaper = true\n".to_owned(),
                false => String::new(),
            },
        ),
        ("buildsrc", buildsrc_path(Path::new(name))),
    ]);

    replace_placeholders(BUILD_TEMPLATE, &vars)
}

/// Module names are paths relative to the root, and must stay inside it.
fn check_name(name: &str) -> Result<(), Error> {
    let path = Path::new(name);
    let inside_root = path.components().all(|component| {
        matches!(component, Component::Normal(_) | Component::CurDir)
    });

    match inside_root && path.components().any(|c| matches!(c, Component::Normal(_))) {
        true => Ok(()),
        false => Err(Error::InvalidModuleName(name.to_owned())),
    }
}

/// Create the module directory and `build.gradle` for `name` under `root`,
/// then include it from the root `settings.gradle`. Nothing is created if
/// `settings.gradle` can't be opened.
pub fn new_module(root: &Path, name: &str, props: &ModuleProperties) -> anyhow::Result<()> {
    check_name(name)?;

    let settings = root.join(SETTINGS_FILE);
    let mut settings_file = OpenOptions::new()
        .append(true)
        .open(&settings)
        .with_context(|| format!("failed to open {}", settings.display()))?;

    let module_dir = root.join(name);
    println!("creating module dir at: {}", module_dir.display());
    fs::create_dir_all(&module_dir)
        .with_context(|| format!("failed to create {}", module_dir.display()))?;

    let build_file = module_dir.join("build.gradle");
    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&build_file)
    {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            return Err(Error::ModuleExists(build_file).into());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to create {}", build_file.display()));
        }
    };

    file.write_all(build_gradle(name, props).as_bytes())
        .with_context(|| format!("failed to write {}", build_file.display()))?;
    println!("created build.gradle in module dir");

    write!(settings_file, "\ninclude '{name}'\n")
        .with_context(|| format!("failed to write {}", settings.display()))?;
    println!("modified {SETTINGS_FILE} to include module");

    Ok(())
}

/// The grammar of one wizard line: a command word and an optional value.
fn wizard_parser() -> ArgParser {
    ArgParser::new()
        .with(Argument::positional("command", TypeTag::Str))
        .with(Argument::positional("value", TypeTag::Str))
}

/// What a single line typed into the wizard means.
#[derive(Debug, PartialEq, Eq)]
enum WizardStep {
    Paper,
    Version(String),
    Finish,
    Cancel,
    Nothing,
    Unknown(String),
}

fn wizard_step(parser: &ArgParser, line: &str) -> WizardStep {
    let values = match parser.parse(line) {
        Ok(values) => values,
        Err(err) => return WizardStep::Unknown(err.to_string()),
    };

    match values.str("command") {
        None => WizardStep::Nothing,
        Some("hasPaper" | "p") => WizardStep::Paper,
        Some("version" | "v") => match values.str("value") {
            Some(version) if !version.is_empty() => WizardStep::Version(version.to_owned()),
            _ => WizardStep::Unknown("version needs a value".to_owned()),
        },
        Some("exit" | "done" | "end" | "e" | "confirm") => WizardStep::Finish,
        Some("cancel" | "c") => WizardStep::Cancel,
        Some(other) => WizardStep::Unknown(format!("unknown command {other:?}")),
    }
}

/**
Run the new-module wizard: read commands from `input` until one of the
finishing commands (or end of input), writing prompts and feedback to
`output`. Returns [`None`] if the user cancelled.
*/
pub fn wizard(
    name: &str,
    mut input: impl BufRead,
    mut output: impl Write,
) -> io::Result<Option<ModuleProperties>> {
    let parser = wizard_parser();
    let mut props = ModuleProperties::default();
    let mut line = String::new();

    writeln!(output, "wizard: create module {name} in project")?;

    loop {
        write!(output, "wizard new-module $ ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        match wizard_step(&parser, &line) {
            WizardStep::Paper => {
                props.has_paper = true;
                writeln!(output, "new-module: hasPaper set")?;
            }
            WizardStep::Version(version) => {
                writeln!(output, "new-module: version = {version}")?;
                props.version = version;
            }
            WizardStep::Finish => break,
            WizardStep::Cancel => {
                writeln!(output, "new module create cancelled")?;
                return Ok(None);
            }
            WizardStep::Nothing => {}
            WizardStep::Unknown(message) => {
                let help = lazy_format!(
                    "{message} (try: hasPaper, version <v>, done, cancel)"
                );
                writeln!(output, "new-module: {help}")?;
            }
        }
    }

    Ok(Some(props))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run_wizard(script: &str) -> (Option<ModuleProperties>, String) {
        let mut output = Vec::new();
        let props = wizard("core", script.as_bytes(), &mut output).unwrap();
        (props, String::from_utf8(output).unwrap())
    }

    #[test]
    fn wizard_defaults_on_eof() {
        let (props, _) = run_wizard("");
        assert_eq!(props, Some(ModuleProperties::default()));
    }

    #[test]
    fn wizard_sets_properties() {
        let (props, output) = run_wizard("p\nversion 2.3.4\ndone\nversion 9\n");

        assert_eq!(
            props,
            Some(ModuleProperties {
                has_paper: true,
                version: "2.3.4".to_owned(),
            })
        );
        assert!(output.contains("new-module: version = 2.3.4"), "{output}");
    }

    #[test]
    fn wizard_cancel() {
        let (props, output) = run_wizard("hasPaper\ncancel\n");

        assert_eq!(props, None);
        assert!(output.contains("cancelled"), "{output}");
    }

    #[test]
    fn wizard_reports_unknown_commands() {
        let (props, output) = run_wizard("frobnicate\n\nv\nconfirm\n");

        assert_eq!(props, Some(ModuleProperties::default()));
        assert!(output.contains("unknown command \"frobnicate\""), "{output}");
        assert!(output.contains("version needs a value"), "{output}");
    }

    #[test]
    fn wizard_rejects_extra_words() {
        let (_, output) = run_wizard("version 1 2\ne\n");
        assert!(output.contains("unexpected positional argument 2"), "{output}");
    }

    #[test]
    fn build_gradle_plain() {
        let content = build_gradle("core", &ModuleProperties::default());

        assert!(content.contains("id \"com.github.johnrengelman.shadow\" version \"7.1.2\"\n\n}\n"));
        assert!(content.contains("version '1.0.0'\n"));
        assert!(content.contains("ext {\n}\n"));
        assert!(content.contains("apply from: '../buildsrc/module.gradle', to: project\n"));
        assert!(!content.contains("paperweight"));
    }

    #[test]
    fn build_gradle_with_paper() {
        let props = ModuleProperties {
            has_paper: true,
            version: "0.2.0".to_owned(),
        };
        let content = build_gradle("plugins/core", &props);

        assert!(content.contains("\tid ('io.papermc.paperweight.userdev') version '1.3.5'\n}"));
        assert!(content.contains("ext {\n\thasPaper = true\n}\n"));
        assert!(content.contains("apply from: '../../buildsrc/module.gradle'"));
    }

    #[test]
    fn new_module_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "rootProject.name = 'demo'\n").unwrap();

        new_module(dir.path(), "core", &ModuleProperties::default()).unwrap();

        let build = fs::read_to_string(dir.path().join("core/build.gradle")).unwrap();
        assert_eq!(build, build_gradle("core", &ModuleProperties::default()));

        let settings = fs::read_to_string(dir.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(settings, "rootProject.name = 'demo'\n\ninclude 'core'\n");
    }

    #[test]
    fn new_module_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "").unwrap();
        new_module(dir.path(), "core", &ModuleProperties::default()).unwrap();

        let err = new_module(dir.path(), "core", &ModuleProperties::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ModuleExists(_))
        ));
    }

    #[test]
    fn new_module_without_settings_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();

        assert!(new_module(dir.path(), "core", &ModuleProperties::default()).is_err());
        assert!(!dir.path().join("core").exists());

        fs::write(dir.path().join(SETTINGS_FILE), "").unwrap();
        new_module(dir.path(), "core", &ModuleProperties::default()).unwrap();
        assert!(dir.path().join("core/build.gradle").is_file());
    }

    #[test]
    fn new_module_rejects_names_outside_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "").unwrap();

        for name in ["../sib", "core/../../x", "/abs", "", "."] {
            let err = new_module(dir.path(), name, &ModuleProperties::default()).unwrap_err();
            assert!(
                matches!(err.downcast_ref::<Error>(), Some(Error::InvalidModuleName(_))),
                "{name:?}: {err}"
            );
        }

        assert_eq!(fs::read_to_string(dir.path().join(SETTINGS_FILE)).unwrap(), "");
    }

    #[test]
    fn current_dir_components_do_not_count() {
        assert_eq!(buildsrc_path(Path::new("./plugins/core")), "../../buildsrc");
    }
}

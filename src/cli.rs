//! Minimal CLI: grammar → (specs | generate)
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indexmap::IndexMap;
use rayon::prelude::*;

use modelgen::{GrammarModel, ModelGenConfig, ModelGenerator, TargetKind};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// synthesize model classes from a grammar's `rule[Class::Base]` annotations
#[derive(Parser, Debug)]
#[command(name = "modelgen", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print each rule's class chain and the declaration order as JSON
    Specs(SpecsOut),
    /// emit model class declarations
    Generate(GenerateOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more grammar JSON files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct GeneratorSettings {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// name prefix of the generated semantics class (defaults to the grammar name)
    #[arg(long)]
    name: Option<String>,

    /// qualified root type every model derives from (e.g. tatsu.objectmodel.Node)
    #[arg(long)]
    base_type: Option<String>,

    /// output language
    #[arg(long, value_enum)]
    target: Option<TargetKind>,

    /// fail on class names that shadow a built-in instead of skipping them
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(clap::Parser, Debug)]
struct SpecsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    generator_settings: GeneratorSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    generator_settings: GeneratorSettings,

    /// output file for a single grammar, output directory for several (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_grammars(&self) -> Result<Vec<(PathBuf, GrammarModel)>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        source_paths
            .into_iter()
            .map(|path| {
                let grammar = GrammarModel::load(&path)
                    .with_context(|| format!("failed to load grammar {}", path.display()))?;
                Ok((path, grammar))
            })
            .collect()
    }
}

impl GeneratorSettings {
    fn load_config(&self) -> Result<ModelGenConfig> {
        let mut config = match self.config.as_ref() {
            Some(path) => ModelGenConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ModelGenConfig::default(),
        };
        if let Some(name) = &self.name {
            config.name = Some(name.clone());
        }
        if let Some(base_type) = &self.base_type {
            config.base_type = Some(base_type.clone());
        }
        if let Some(target) = self.target {
            config.target = target;
        }
        config.strict |= self.strict;
        Ok(config)
    }

    fn generator(&self) -> Result<ModelGenerator> {
        Ok(ModelGenerator::new(self.load_config()?)?)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Specs(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let generator = target.generator_settings.generator()?;
                let grammars = target.input_settings.load_grammars()?;
                let reports = grammars
                    .iter()
                    .map(|(path, grammar)| {
                        generator
                            .specs(grammar)
                            .with_context(|| format!("failed to order classes of {}", path.display()))
                    })
                    .collect::<Result<Vec<_>>>()?;
                let json_src = match reports.as_slice() {
                    [single] => serde_json::to_string_pretty(single)?,
                    many => serde_json::to_string_pretty(many)?,
                };
                match target.out.as_ref() {
                    Some(out) => write_output(out, &json_src)?,
                    None => println!("{json_src}"),
                }
            }
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let generator = target.generator_settings.generator()?;
                let grammars = target.input_settings.load_grammars()?;
                match (grammars.as_slice(), target.out.as_ref()) {
                    ([(path, grammar)], out) => {
                        let source = generator
                            .generate_model(grammar)
                            .with_context(|| format!("failed to generate {}", path.display()))?;
                        match out {
                            Some(out) => write_output(out, &source)?,
                            None => print!("{source}"),
                        }
                    }
                    (_, None) => bail!("--out <DIR> is required when generating several grammars"),
                    (many, Some(out_dir)) => {
                        let ext = generator.target().file_extension();
                        let out_paths = output_paths(many, out_dir, ext)?;
                        many.par_iter()
                            .zip(&out_paths)
                            .try_for_each(|((path, grammar), out)| -> Result<()> {
                                let source = generator
                                    .generate_model(grammar)
                                    .with_context(|| format!("failed to generate {}", path.display()))?;
                                write_output(out, &source)
                            })?;
                    }
                }
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn output_file_name(grammar_name: &str, ext: &str) -> String {
    let stem = modelgen::naming::safe_name(grammar_name, |_| false).to_lowercase();
    format!("{stem}_model.{ext}")
}

/// One output path per grammar; two grammars mapping to the same file is an error.
fn output_paths(
    grammars: &[(PathBuf, GrammarModel)],
    out_dir: &Path,
    ext: &str,
) -> Result<Vec<PathBuf>> {
    let mut seen = IndexMap::<PathBuf, &Path>::new();
    for (source, grammar) in grammars {
        let out = out_dir.join(output_file_name(&grammar.name, ext));
        if let Some(previous) = seen.insert(out.clone(), source) {
            bail!(
                "{} and {} both generate {}",
                previous.display(),
                source.display(),
                out.display()
            );
        }
    }
    Ok(seen.into_keys().collect())
}

fn write_output(out: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, contents).with_context(|| format!("failed to write {}", out.display()))?;
    eprintln!("{} {}", "wrote".green().bold(), out.display());
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            // Treat as a glob pattern
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            // Treat as a literal path
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names_are_lowercase_identifiers() {
        assert_eq!(output_file_name("Calc", "py"), "calc_model.py");
        assert_eq!(output_file_name("My Grammar", "rs"), "my_grammar_model.rs");
    }

    #[test]
    fn colliding_output_names_are_rejected() {
        let grammar = |name: &str| GrammarModel { name: name.into(), rules: vec![] };
        let grammars = vec![
            (PathBuf::from("a.json"), grammar("Calc")),
            (PathBuf::from("b.json"), grammar("calc")),
        ];
        let err = output_paths(&grammars, Path::new("out"), "py").unwrap_err().to_string();
        assert!(err.contains("a.json") && err.contains("b.json"), "{err}");
        assert!(err.contains("calc_model.py"), "{err}");
    }

    #[test]
    fn distinct_output_names_keep_input_order() {
        let grammar = |name: &str| GrammarModel { name: name.into(), rules: vec![] };
        let grammars = vec![
            (PathBuf::from("b.json"), grammar("Beta")),
            (PathBuf::from("a.json"), grammar("Alpha")),
        ];
        let paths = output_paths(&grammars, Path::new("out"), "rs").unwrap();
        assert_eq!(
            paths,
            vec![PathBuf::from("out/beta_model.rs"), PathBuf::from("out/alpha_model.rs")]
        );
    }

    #[test]
    fn literal_paths_pass_through() {
        let paths = resolve_file_path_patterns(["a.json", "dir/b.json"]).unwrap();
        assert_eq!(paths, vec![PathBuf::from("a.json"), PathBuf::from("dir/b.json")]);
    }

    #[test]
    fn empty_glob_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.json", dir.path().display());
        assert!(resolve_file_path_patterns([pattern]).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{"name": "FromFile", "target": "rust"}"#).unwrap();
        let settings = GeneratorSettings {
            config: Some(path),
            name: Some("FromFlag".into()),
            base_type: None,
            target: None,
            strict: true,
        };
        let cfg = settings.load_config().unwrap();
        assert_eq!(cfg.name.as_deref(), Some("FromFlag"));
        assert_eq!(cfg.target, TargetKind::Rust);
        assert!(cfg.strict);
    }

    #[test]
    fn parses_generate_command() {
        let cli = CommandLineInterface::try_parse_from([
            "modelgen", "generate", "-i", "g.json", "--target", "rust", "--strict",
        ])
        .unwrap();
        match cli.cmd {
            Command::Generate(g) => {
                assert_eq!(g.input_settings.input, vec!["g.json"]);
                assert_eq!(g.generator_settings.target, Some(TargetKind::Rust));
                assert!(g.generator_settings.strict);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

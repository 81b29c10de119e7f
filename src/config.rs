use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};

// Base cabal configuration. Unset keys fall back to these defaults;
// per-call overrides never mutate the stored value.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    pub sandbox: Option<String>,
    pub optimization: i32,
    pub jobs: usize,
    pub tests: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sandbox: None,
            optimization: 0,
            jobs: 1,
            tests: true,
        }
    }
}

impl Config {
    pub fn load() -> figment::error::Result<Config> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        for path in vec![global_config_path(), local_config_path()]
            .into_iter()
            .flatten()
        {
            figment = figment.merge(Yaml::file(path));
        }

        figment.merge(Env::prefixed("CABAL_STEPS_")).extract()
    }

    pub fn load_file(path: &Path) -> figment::error::Result<Config> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .extract()
    }

    pub fn help() {
        println!("cabal-steps configuration:");
        println!(
            "  system config path: {}",
            global_config_path()
                .and_then(|v| Some(v.to_str()?.to_string()))
                .unwrap_or_else(|| "none".to_string())
        );
        println!(
            "  user config path:   {}",
            local_config_path()
                .and_then(|v| Some(v.to_str()?.to_string()))
                .unwrap_or_else(|| "none".to_string())
        );
        println!();
        println!("Current configuration:");
        match Config::load() {
            Ok(c) => {
                c.show();
            }
            Err(e) => {
                println!("  ERROR: {e}");
            }
        }
        println!();
    }

    fn show(&self) {
        println!("{}", serde_yaml::to_string(self).unwrap());
    }

    // Right-biased merge: keys present in the override replace the base
    // value, absent keys keep it. The base is left untouched.
    pub fn merged(&self, overrides: &Overrides) -> Config {
        Config {
            sandbox: overrides
                .sandbox
                .clone()
                .unwrap_or_else(|| self.sandbox.clone()),
            optimization: overrides.optimization.unwrap_or(self.optimization),
            jobs: overrides.jobs.unwrap_or(self.jobs),
            tests: overrides.tests.unwrap_or(self.tests),
        }
    }
}

// Per-call override set. Every key is optional; `sandbox` additionally
// distinguishes "not overridden" from "overridden to none".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    sandbox: Option<Option<String>>,
    optimization: Option<i32>,
    jobs: Option<usize>,
    tests: Option<bool>,
}

impl Overrides {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn sandbox<S: Into<String>>(mut self, sandbox: S) -> Self {
        self.sandbox = Some(Some(sandbox.into()));
        self
    }

    pub fn no_sandbox(mut self) -> Self {
        self.sandbox = Some(None);
        self
    }

    pub fn optimization(mut self, level: i32) -> Self {
        self.optimization = Some(level);
        self
    }

    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    pub fn tests(mut self, tests: bool) -> Self {
        self.tests = Some(tests);
        self
    }
}

fn local_config_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "cabal-steps")?;
    Some(dirs.config_dir().join("cabal-steps.yml"))
}

#[cfg(windows)]
fn global_config_path() -> Option<PathBuf> {
    use std::env;

    Some(
        PathBuf::from(env::var("ProgramData").ok()?)
            .join("cabal-steps")
            .join("cabal-steps.yml"),
    )
}

#[cfg(unix)]
fn global_config_path() -> Option<PathBuf> {
    Some(
        PathBuf::from("/etc")
            .join("cabal-steps")
            .join("cabal-steps.yml"),
    )
}

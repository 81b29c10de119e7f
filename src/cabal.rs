use thiserror::Error;

use crate::config::{Config, Overrides};
use crate::step::{BuildStep, CommandLine, Template};

// File name cabal puts the sandbox settings into.
const SANDBOX_CONFIG_FILE: &str = "cabal.sandbox.config";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CabalError {
    // A sandbox-scoped command was requested without a sandbox path in
    // either the base configuration or the per-call overrides.
    #[error("sandbox is not configured")]
    MissingSandbox,
    #[error("sandbox path can't be quoted for the shell: {0:?}")]
    UnquotablePath(String),
}

// Builds cabal command invocations from a base configuration. Every
// operation merges the per-call overrides over the base for that call
// only, so concurrent callers never observe each other's overrides.
pub struct Cabal {
    config: Config,
}

impl Cabal {
    pub fn new(config: Config) -> Self {
        Cabal { config }
    }

    // The `cabal update` command takes none of the configuration flags,
    // so the overrides are accepted only for call-site uniformity.
    pub fn update(&self, _overrides: Overrides) -> BuildStep {
        BuildStep {
            name: "cabal update".to_string(),
            description: "Downloading the latest package list".to_string(),
            command: CommandLine::Argv(vec![Template::text("cabal"), Template::text("update")]),
        }
    }

    pub fn install(&self, package: &str, overrides: Overrides) -> BuildStep {
        let config = self.config.merged(&overrides);
        let mut argv = vec![Template::text("cabal")];
        argv.extend(all_opts(&config));
        argv.push(Template::text("install"));
        argv.push(Template::text(package));
        BuildStep {
            name: format!("cabal install {package}"),
            description: format!("Installing {package}"),
            command: CommandLine::Argv(argv),
        }
    }

    // `mkdir -p` keeps the step idempotent: initializing an already
    // existing sandbox directory is not an error.
    pub fn sandbox_init(&self, overrides: Overrides) -> Result<BuildStep, CabalError> {
        let sandbox = self.sandbox(&overrides)?;
        let quoted = quote(&sandbox)?;
        let line = Template::text("mkdir -p ")
            .push_workdir()
            .push_text(format!("/{quoted} && cd "))
            .push_workdir()
            .push_text(format!("/{quoted} && cabal sandbox init"));
        Ok(BuildStep {
            name: "cabal sandbox init".to_string(),
            description: format!("Initializing sandbox at {sandbox}"),
            command: CommandLine::Shell(line),
        })
    }

    // Removes the sandbox metadata only, not the directory itself.
    pub fn sandbox_delete(&self, overrides: Overrides) -> Result<BuildStep, CabalError> {
        let sandbox = self.sandbox(&overrides)?;
        let quoted = quote(&sandbox)?;
        let line = Template::text("cd ")
            .push_workdir()
            .push_text(format!("/{quoted} && cabal sandbox delete"));
        Ok(BuildStep {
            name: "cabal sandbox delete".to_string(),
            description: format!("Deleting sandbox at {sandbox}"),
            command: CommandLine::Shell(line),
        })
    }

    fn sandbox(&self, overrides: &Overrides) -> Result<String, CabalError> {
        self.config
            .merged(overrides)
            .sandbox
            .ok_or(CabalError::MissingSandbox)
    }
}

// Configuration flags for `cabal install`, in fixed order: sandbox
// (when set), optimization, parallelism, tests. Each exactly once.
fn all_opts(config: &Config) -> Vec<Template> {
    let mut opts = Vec::new();
    if let Some(ref sandbox) = config.sandbox {
        opts.push(
            Template::text("--sandbox-config-file=")
                .push_workdir()
                .push_text(format!("/{sandbox}/{SANDBOX_CONFIG_FILE}")),
        );
    }
    opts.push(Template::text(format!(
        "--ghc-option=-O{}",
        config.optimization
    )));
    opts.push(Template::text(format!("-j{}", config.jobs)));
    opts.push(Template::text(if config.tests {
        "--enable-tests"
    } else {
        "--disable-tests"
    }));
    opts
}

fn quote(path: &str) -> Result<String, CabalError> {
    shlex::try_quote(path)
        .map(|s| s.into_owned())
        .map_err(|_| CabalError::UnquotablePath(path.to_string()))
}

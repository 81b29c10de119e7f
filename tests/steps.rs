use std::fs;

use cabal_steps::cabal::Cabal;
use cabal_steps::config::{Config, Overrides};
use cabal_steps::step::CommandLine;

fn resolve(command: &CommandLine, workdir: &str) -> String {
    match command {
        CommandLine::Argv(args) => args
            .iter()
            .map(|a| a.resolve(workdir))
            .collect::<Vec<_>>()
            .join(" "),
        CommandLine::Shell(line) => line.resolve(workdir),
    }
}

#[test]
fn test_steps_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cabal-steps.yml");
    fs::write(&path, "sandbox: hs\noptimization: 1\njobs: 4\n").unwrap();
    let cabal = Cabal::new(Config::load_file(&path).unwrap());

    let update = cabal.update(Overrides::new());
    assert_eq!(resolve(&update.command, "/build"), "cabal update");

    let install = cabal.install("ansi-terminal", Overrides::new().optimization(0).jobs(2));
    assert_eq!(install.name, "cabal install ansi-terminal");
    assert_eq!(
        resolve(&install.command, "/build"),
        "cabal --sandbox-config-file=/build/hs/cabal.sandbox.config \
         --ghc-option=-O0 -j2 --enable-tests install ansi-terminal"
    );

    let init = cabal.sandbox_init(Overrides::new()).unwrap();
    assert_eq!(
        resolve(&init.command, "/build"),
        "mkdir -p /build/hs && cd /build/hs && cabal sandbox init"
    );

    let delete = cabal.sandbox_delete(Overrides::new()).unwrap();
    assert_eq!(
        resolve(&delete.command, "/build"),
        "cd /build/hs && cabal sandbox delete"
    );

    // The overrides passed to `install` above never reach later calls.
    let plain = cabal.install("ansi-terminal", Overrides::new());
    assert_eq!(
        resolve(&plain.command, "/build"),
        "cabal --sandbox-config-file=/build/hs/cabal.sandbox.config \
         --ghc-option=-O1 -j4 --enable-tests install ansi-terminal"
    );
}

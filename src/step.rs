// One piece of a command token. `WorkDir` stands for the working
// directory of the build, substituted by the CI executor at run time,
// not when the step is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Piece {
    Text(String),
    WorkDir,
}

// Command token with deferred working-directory substitution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Template {
    pieces: Vec<Piece>,
}

impl Template {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn text<S: Into<String>>(text: S) -> Self {
        Template::new().push_text(text)
    }

    pub fn push_text<S: Into<String>>(mut self, text: S) -> Self {
        self.pieces.push(Piece::Text(text.into()));
        self
    }

    pub fn push_workdir(mut self) -> Self {
        self.pieces.push(Piece::WorkDir);
        self
    }

    pub fn needs_workdir(&self) -> bool {
        self.pieces.iter().any(|p| *p == Piece::WorkDir)
    }

    // Substitute the working directory into every deferred piece.
    pub fn resolve(&self, workdir: &str) -> String {
        let mut result = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => result.push_str(text),
                Piece::WorkDir => result.push_str(workdir),
            }
        }
        result
    }
}

// Command of a build step: either an argument vector executed without
// a shell, or a single line executed through the shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandLine {
    Argv(Vec<Template>),
    Shell(Template),
}

// One build step for the CI pipeline executor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildStep {
    pub name: String,
    pub description: String,
    pub command: CommandLine,
}

#[test]
fn test_resolve_literal() {
    assert_eq!(Template::text("cabal update").resolve("/build"), "cabal update");
}

#[test]
fn test_resolve_workdir() {
    let template = Template::text("cd ").push_workdir().push_text("/sandbox");
    assert!(template.needs_workdir());
    assert_eq!(template.resolve("/build/w1"), "cd /build/w1/sandbox");
}

#[test]
fn test_resolve_is_deferred() {
    // The same template resolves against different workdirs.
    let template = Template::new().push_workdir().push_text("/x");
    assert_eq!(template.resolve("/a"), "/a/x");
    assert_eq!(template.resolve("/b"), "/b/x");
}

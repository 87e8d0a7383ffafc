//! Image rendering through the Graphviz `dot` engine.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::RenderError;
use crate::graph::dot::{to_dot, DotStyle};
use crate::graph::GraphDescription;
use crate::process::{CommandRunner, Invocation};

/// Name of the layout engine executable.
pub const ENGINE: &str = "dot";

/// Output image format and file extension.
pub const IMAGE_FORMAT: &str = "png";

/// What happened to the intermediate source file.
#[derive(Debug)]
pub enum Cleanup {
    /// The file was deleted.
    Removed,
    /// There was nothing to delete.
    AlreadyAbsent,
    /// Deleting failed; the file may still be present.
    Failed(io::Error),
}

/// A successfully rendered image.
#[derive(Debug)]
pub struct RenderOutput {
    /// Path of the rendered image, `<stem>.png`.
    pub image: PathBuf,
    /// Path of the intermediate source, `<stem>`.
    pub source: PathBuf,
    /// Outcome of removing the intermediate source.
    pub cleanup: Cleanup,
}

/// Renders graph descriptions to PNG images.
pub struct Renderer<R> {
    runner: R,
    engine_dir: Option<PathBuf>,
    style: DotStyle,
}

impl<R: CommandRunner> Renderer<R> {
    /// Creates a renderer that finds the engine on the inherited search path.
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            engine_dir: None,
            style: DotStyle::default(),
        }
    }

    /// Looks for the engine in `dir` before the inherited search path.
    pub fn with_engine_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.engine_dir = dir;
        self
    }

    /// Sets the diagram font.
    pub fn with_style(mut self, style: DotStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns the engine invocation rendering `source` into `image`.
    pub fn engine_invocation(&self, source: &Path, image: &Path) -> Invocation {
        Invocation::new(ENGINE)
            .arg(format!("-T{IMAGE_FORMAT}"))
            .arg("-o")
            .arg(image)
            .arg(source)
            .search_dir(self.engine_dir.clone())
    }

    /// Writes `<stem>`, renders it to `<stem>.png` and removes `<stem>`.
    ///
    /// The source file is removed whether or not the engine succeeds. Failure
    /// to remove it is reported in [`RenderOutput::cleanup`] rather than as an
    /// error.
    pub fn render(
        &self,
        graph: &GraphDescription,
        stem: &Path,
    ) -> Result<RenderOutput, RenderError> {
        let source = stem.to_path_buf();
        let image = image_path(stem);

        fs::write(&source, to_dot(graph, &self.style)).map_err(|e| RenderError::WriteSource {
            path: source.clone(),
            source: e,
        })?;
        debug!(source = %source.display(), nodes = graph.nodes.len(), "Wrote graph source");

        let invocation = self.engine_invocation(&source, &image);
        let result = self.runner.run(&invocation);
        let cleanup = remove_source(&source);

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                return Err(RenderError::EngineUnavailable {
                    program: invocation.program,
                    source: e,
                })
            }
        };
        if !output.success {
            return Err(RenderError::EngineFailed {
                program: invocation.program,
                status: output.status_label(),
                stderr: output.stderr_text(),
            });
        }

        info!(image = %image.display(), "Rendered commit chain");
        Ok(RenderOutput {
            image,
            source,
            cleanup,
        })
    }
}

/// Returns `<stem>.png`, keeping any dots already in the stem.
pub fn image_path(stem: &Path) -> PathBuf {
    let mut name = OsString::from(stem.as_os_str());
    name.push(".");
    name.push(IMAGE_FORMAT);
    PathBuf::from(name)
}

fn remove_source(source: &Path) -> Cleanup {
    match fs::remove_file(source) {
        Ok(()) => Cleanup::Removed,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Cleanup::AlreadyAbsent,
        Err(e) => {
            debug!(source = %source.display(), error = %e, "Failed to remove graph source");
            Cleanup::Failed(e)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::graph::build_chain;
    use crate::git::CommitRecord;
    use crate::process::CommandOutput;
    use std::cell::RefCell;

    /// Stands in for `dot`: writes a fake image to the `-o` target.
    #[derive(Default)]
    struct FakeDot {
        calls: RefCell<Vec<Invocation>>,
        sources: RefCell<Vec<String>>,
    }

    impl CommandRunner for FakeDot {
        fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
            self.calls.borrow_mut().push(invocation.clone());
            let image = &invocation.args[2];
            let source = &invocation.args[3];
            self.sources.borrow_mut().push(fs::read_to_string(source)?);
            fs::write(image, b"\x89PNG")?;
            Ok(CommandOutput::success(Vec::new()))
        }
    }

    struct FailingDot;

    impl CommandRunner for FailingDot {
        fn run(&self, _invocation: &Invocation) -> io::Result<CommandOutput> {
            Ok(CommandOutput::failure(1, "Error: syntax error in line 3\n"))
        }
    }

    struct NoDot;

    impl CommandRunner for NoDot {
        fn run(&self, _invocation: &Invocation) -> io::Result<CommandOutput> {
            Err(io::Error::new(io::ErrorKind::NotFound, "dot not found"))
        }
    }

    fn sample_graph() -> GraphDescription {
        build_chain(&[
            CommitRecord::new("aaa", 1_700_000_000, "Alice", "msg1").unwrap(),
            CommitRecord::new("bbb", 1_700_000_100, "Bob", "msg2").unwrap(),
        ])
    }

    #[test]
    fn image_path_appends_extension() {
        assert_eq!(image_path(Path::new("out")), PathBuf::from("out.png"));
        assert_eq!(
            image_path(Path::new("dir/history.v2")),
            PathBuf::from("dir/history.v2.png")
        );
    }

    #[test]
    fn engine_invocation_uses_configured_dir() {
        let renderer =
            Renderer::new(NoDot).with_engine_dir(Some(PathBuf::from("/opt/graphviz/bin")));
        let inv = renderer.engine_invocation(Path::new("out"), Path::new("out.png"));

        assert_eq!(inv.program, "dot");
        assert_eq!(
            inv.args,
            vec![
                OsString::from("-Tpng"),
                OsString::from("-o"),
                OsString::from("out.png"),
                OsString::from("out"),
            ]
        );
        assert_eq!(inv.search_dir, Some(PathBuf::from("/opt/graphviz/bin")));
    }

    #[test]
    fn render_produces_image_and_removes_source() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("history");
        let dot = FakeDot::default();

        let output = Renderer::new(&dot).render(&sample_graph(), &stem).unwrap();

        assert_eq!(output.image, dir.path().join("history.png"));
        assert!(output.image.exists());
        assert!(!stem.exists());
        assert!(matches!(output.cleanup, Cleanup::Removed));

        let sources = dot.sources.borrow();
        assert_eq!(sources.len(), 1);
        assert!(sources[0].contains("0 -> 1"));
        assert!(sources[0].contains(r#"fontname="Arial""#));
    }

    #[test]
    fn render_applies_style() {
        let dir = tempfile::tempdir().unwrap();
        let dot = FakeDot::default();
        let style = DotStyle {
            font_name: "DejaVu Sans".to_string(),
            font_size: 14.0,
        };

        Renderer::new(&dot)
            .with_style(style)
            .render(&sample_graph(), &dir.path().join("out"))
            .unwrap();

        assert!(dot.sources.borrow()[0].contains(r#"fontname="DejaVu Sans" fontsize=14"#));
    }

    #[test]
    fn engine_failure_is_an_error_and_source_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("out");

        let err = Renderer::new(FailingDot)
            .render(&sample_graph(), &stem)
            .unwrap_err();

        match err {
            RenderError::EngineFailed { program, status, stderr } => {
                assert_eq!(program, "dot");
                assert_eq!(status, "exit code 1");
                assert_eq!(stderr, "Error: syntax error in line 3");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!stem.exists());
        assert!(!image_path(&stem).exists());
    }

    #[test]
    fn missing_engine_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = Renderer::new(NoDot)
            .render(&sample_graph(), &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, RenderError::EngineUnavailable { .. }));
    }

    #[test]
    fn unwritable_stem_fails_before_running_engine() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("missing-dir").join("out");
        let dot = FakeDot::default();

        let err = Renderer::new(&dot).render(&sample_graph(), &stem).unwrap_err();

        assert!(matches!(err, RenderError::WriteSource { .. }));
        assert!(dot.calls.borrow().is_empty());
    }

    #[test]
    fn source_removed_by_engine_counts_as_absent() {
        struct DeletingDot;

        impl CommandRunner for DeletingDot {
            fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
                fs::write(&invocation.args[2], b"\x89PNG")?;
                fs::remove_file(&invocation.args[3])?;
                Ok(CommandOutput::success(Vec::new()))
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let output = Renderer::new(DeletingDot)
            .render(&sample_graph(), &dir.path().join("out"))
            .unwrap();
        assert!(matches!(output.cleanup, Cleanup::AlreadyAbsent));
    }

    #[test]
    fn cleanup_failure_is_reported_without_failing_render() {
        /// Leaves a non-empty directory where the source file was.
        struct DirectoryDot;

        impl CommandRunner for DirectoryDot {
            fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
                let source = Path::new(&invocation.args[3]);
                fs::write(&invocation.args[2], b"\x89PNG")?;
                fs::remove_file(source)?;
                fs::create_dir(source)?;
                fs::write(source.join("keep"), b"")?;
                Ok(CommandOutput::success(Vec::new()))
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("out");
        let output = Renderer::new(DirectoryDot)
            .render(&sample_graph(), &stem)
            .unwrap();

        assert!(matches!(output.cleanup, Cleanup::Failed(_)));
        assert!(output.image.exists());
        assert!(stem.is_dir());
    }
}

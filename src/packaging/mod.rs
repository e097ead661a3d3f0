//! Packaging of finalized documents into font files
//!
//! Each document is written as a UFO source and compiled to a binary font
//! as soon as the builder finalizes it. Once a run is complete the binaries
//! are placed in the output directory: one document as a single font, more
//! as a collection preserving document order.

pub mod compiler;
pub mod manifest;
pub mod naming;

pub use compiler::{ExternalToolchain, FontToolchain};
pub use manifest::{BuildManifest, StagedDocument};
pub use naming::{write_with_fallback, FALLBACK_STEM};

use crate::core::errors::Result;
use crate::data::save_ufo;
use crate::font_source::{DocumentSink, FontDocument, TofuMetrics};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What ends up in the output directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compiled fonts, merged into a collection when split
    Binary,
    /// UFO sources only, one per document
    UfoSources,
}

/// Result of packaging one run
#[derive(Debug, Clone)]
pub struct PackageOutput {
    pub outputs: Vec<PathBuf>,
    pub manifest: PathBuf,
}

pub struct Packager<T: FontToolchain> {
    toolchain: T,
    metrics: TofuMetrics,
    build_dir: PathBuf,
    output_dir: PathBuf,
    format: OutputFormat,
    staged: Vec<StagedDocument>,
}

impl<T: FontToolchain> Packager<T> {
    pub fn new(
        toolchain: T,
        metrics: TofuMetrics,
        build_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        format: OutputFormat,
    ) -> Self {
        Self {
            toolchain,
            metrics,
            build_dir: build_dir.into(),
            output_dir: output_dir.into(),
            format,
            staged: Vec::new(),
        }
    }

    pub fn staged(&self) -> &[StagedDocument] {
        &self.staged
    }

    /// Write the document's source and, for binary output, compile it
    pub fn stage(&mut self, document: FontDocument) -> Result<()> {
        let font = document.to_norad_font(&self.metrics)?;
        let index = document.index();

        let unmapped = document.unmapped_count();
        if unmapped > 0 {
            warn!(
                "Document {} has {} glyphs outside the Unicode scalar range; they are left unmapped",
                index, unmapped
            );
        }

        let staged = match self.format {
            OutputFormat::Binary => {
                fs::create_dir_all(&self.build_dir)?;
                let source = self.build_dir.join(format!("document-{index:03}.ufo"));
                save_ufo(&font, &source)?;

                let binary = self.build_dir.join(format!("document-{index:03}.ttf"));
                self.toolchain.compile(&source, &binary)?;
                debug!("Compiled document {} to {}", index, binary.display());
                StagedDocument::describe(&document, source, Some(binary))
            }
            OutputFormat::UfoSources => {
                let source = write_with_fallback(
                    &self.output_dir,
                    &format!("{}.ufo", document.name_stem()),
                    &format!("{FALLBACK_STEM}-{index}.ufo"),
                    |path| save_ufo(&font, path).map_err(|e| io::Error::other(e.to_string())),
                )?;
                info!("Wrote {}", source.display());
                StagedDocument::describe(&document, source, None)
            }
        };

        self.staged.push(staged);
        Ok(())
    }

    /// Place the final artifacts in the output directory
    fn place_outputs(&self, stem: &str) -> Result<Vec<PathBuf>> {
        if self.format == OutputFormat::UfoSources {
            return Ok(self.staged.iter().map(|doc| doc.source.clone()).collect());
        }

        let fonts: Vec<PathBuf> = self
            .staged
            .iter()
            .filter_map(|doc| doc.binary.clone())
            .collect();

        let output = match fonts.as_slice() {
            [] => return Ok(Vec::new()),
            [single] => copy_with_fallback(single, &self.output_dir, stem, "ttf")?,
            _ => {
                let collection = self.build_dir.join("collection.ttc");
                self.toolchain.merge_collection(&fonts, &collection)?;
                info!("Merged {} fonts into a collection", fonts.len());
                copy_with_fallback(&collection, &self.output_dir, stem, "ttc")?
            }
        };
        Ok(vec![output])
    }

    /// Finish the run and write its manifest
    pub fn package(self, stem: &str, family: &str) -> Result<PackageOutput> {
        let outputs = self.place_outputs(stem)?;
        let manifest = BuildManifest::new(family, outputs.clone(), self.staged);
        info!(
            "Packaged {} glyphs from {} documents",
            manifest.total_glyphs(),
            manifest.documents.len()
        );
        let manifest = manifest.write(&self.output_dir, stem)?;
        Ok(PackageOutput { outputs, manifest })
    }
}

fn copy_with_fallback(from: &Path, dir: &Path, stem: &str, extension: &str) -> Result<PathBuf> {
    write_with_fallback(
        dir,
        &format!("{stem}.{extension}"),
        &format!("{FALLBACK_STEM}.{extension}"),
        |path| fs::copy(from, path).map(|_| ()),
    )
}

impl<T: FontToolchain> DocumentSink for Packager<T> {
    fn accept(&mut self, document: FontDocument) -> Result<()> {
        self.stage(document)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::errors::TofuError;
    use crate::font_source::{DocumentInfo, GlyphComposer};
    use std::cell::RefCell;

    /// Writes placeholder files and records what it was asked to do
    #[derive(Default)]
    pub(crate) struct RecordingToolchain {
        pub compiled: RefCell<Vec<PathBuf>>,
        pub merged: RefCell<Vec<Vec<PathBuf>>>,
    }

    impl FontToolchain for RecordingToolchain {
        fn compile(&self, source: &Path, output: &Path) -> Result<()> {
            assert!(source.join("fontinfo.plist").exists());
            fs::write(output, source.to_string_lossy().as_bytes())?;
            self.compiled.borrow_mut().push(source.to_path_buf());
            Ok(())
        }

        fn merge_collection(&self, fonts: &[PathBuf], output: &Path) -> Result<()> {
            fs::write(output, b"ttcf")?;
            self.merged.borrow_mut().push(fonts.to_vec());
            Ok(())
        }
    }

    fn document(index: usize, codepoints: impl IntoIterator<Item = u32>) -> FontDocument {
        let mut document = FontDocument::new(index, DocumentInfo::default());
        let composer = GlyphComposer::default();
        for codepoint in codepoints {
            let id = document.next_glyph_id();
            document.push(composer.compose(id, codepoint));
        }
        document
    }

    #[test]
    fn test_single_document_is_a_font() {
        let build = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let toolchain = RecordingToolchain::default();
        let mut packager = Packager::new(
            &toolchain,
            TofuMetrics::default(),
            build.path(),
            out.path(),
            OutputFormat::Binary,
        );

        packager.accept(document(0, 0x41..=0x44)).unwrap();
        let result = packager.package("tofu_U+0041_U+0044", "Tofu").unwrap();

        assert_eq!(result.outputs, vec![out.path().join("tofu_U+0041_U+0044.ttf")]);
        assert!(result.outputs[0].exists());
        assert!(result.manifest.exists());
        assert_eq!(toolchain.compiled.borrow().len(), 1);
        assert!(toolchain.merged.borrow().is_empty());
    }

    #[test]
    fn test_documents_merge_in_order() {
        let build = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let toolchain = RecordingToolchain::default();
        let mut packager = Packager::new(
            &toolchain,
            TofuMetrics::default(),
            build.path(),
            out.path(),
            OutputFormat::Binary,
        );

        packager.accept(document(0, 0x41..=0x42)).unwrap();
        packager.accept(document(1, 0x43..=0x44)).unwrap();
        let result = packager.package("tofu_U+0041_U+0044", "Tofu").unwrap();

        assert_eq!(result.outputs, vec![out.path().join("tofu_U+0041_U+0044.ttc")]);
        let merged = toolchain.merged.borrow();
        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged[0],
            vec![
                build.path().join("document-000.ttf"),
                build.path().join("document-001.ttf"),
            ]
        );
    }

    #[test]
    fn test_overlong_stem_uses_fallback() {
        let build = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let mut packager = Packager::new(
            RecordingToolchain::default(),
            TofuMetrics::default(),
            build.path(),
            out.path(),
            OutputFormat::Binary,
        );

        packager.accept(document(0, [0x41])).unwrap();
        let stem = "tofu_U+0041_U+0041".repeat(30);
        let result = packager.package(&stem, "Tofu").unwrap();

        assert_eq!(result.outputs, vec![out.path().join("tofu.ttf")]);
        assert_eq!(result.manifest, out.path().join("tofu-manifest.json"));
    }

    #[test]
    fn test_ufo_sources_skip_the_toolchain() {
        let build = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let toolchain = RecordingToolchain::default();
        let mut packager = Packager::new(
            &toolchain,
            TofuMetrics::default(),
            build.path(),
            out.path(),
            OutputFormat::UfoSources,
        );

        packager.accept(document(0, [0x41, 0xD800])).unwrap();
        assert_eq!(packager.staged()[0].unmapped, 1);

        let result = packager.package("unused", "Tofu").unwrap();
        assert_eq!(
            result.outputs,
            vec![out.path().join("tofu_U+0041_U+0041_U+D800_U+D800.ufo")]
        );
        assert!(result.outputs[0].join("metainfo.plist").exists());
        assert!(toolchain.compiled.borrow().is_empty());
    }

    #[test]
    fn test_toolchain_failure_stops_staging() {
        struct Broken;
        impl FontToolchain for Broken {
            fn compile(&self, _: &Path, _: &Path) -> Result<()> {
                Err(TofuError::Toolchain {
                    tool: "fontc".to_string(),
                    message: "boom".to_string(),
                })
            }
            fn merge_collection(&self, _: &[PathBuf], _: &Path) -> Result<()> {
                unreachable!()
            }
        }

        let build = tempfile::tempdir().unwrap();
        let mut packager = Packager::new(
            Broken,
            TofuMetrics::default(),
            build.path(),
            build.path(),
            OutputFormat::Binary,
        );
        assert!(packager.accept(document(0, [0x41])).is_err());
        assert!(packager.staged().is_empty());
    }
}

//! Parallel rendering of many records using rayon.
//!
//! Each input is a JSON record file; each output is an XML file named after
//! the input's stem. A failing input is counted and reported but never
//! stops the rest of the batch.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rayon::prelude::*;

use crate::{MetadataRecord, RecordRenderer, Result};

/// Renders batches of JSON record files in parallel.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchRenderer {
    renderer: RecordRenderer,
    strict: bool,
}

impl BatchRenderer {
    /// Create a batch renderer around the given renderer.
    pub fn new(renderer: RecordRenderer) -> Self {
        Self {
            renderer,
            strict: false,
        }
    }

    /// Reject records with missing required fields instead of rendering them.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Render every input file into `output_dir`.
    ///
    /// The progress callback receives (completed, total) counts.
    pub fn render_files<P, F>(&self, inputs: &[PathBuf], output_dir: P, mut progress: F) -> Result<BatchStats>
    where
        P: AsRef<Path>,
        F: FnMut(usize, usize) + Send,
    {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        let total = inputs.len();
        let rendered = AtomicUsize::new(0);
        let failures = Mutex::new(Vec::new());
        let progress = Mutex::new(&mut progress);

        inputs.par_iter().for_each(|input| {
            match self.render_file(input, output_dir) {
                Ok(_) => {
                    rendered.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => failures.lock().push((input.clone(), e.to_string())),
            }

            let mut progress = progress.lock();
            let done = rendered.load(Ordering::Relaxed) + failures.lock().len();
            (*progress)(done, total);
        });

        let failures = failures.into_inner();
        Ok(BatchStats {
            rendered: rendered.load(Ordering::Relaxed),
            failed: failures.len(),
            total,
            failures,
        })
    }

    /// Render records in parallel, returning XML strings in input order.
    pub fn render_to_strings(&self, records: &[MetadataRecord]) -> Vec<Result<String>> {
        records
            .par_iter()
            .map(|record| self.render_record(record))
            .collect()
    }

    /// Render one JSON record file, returning the path written.
    pub fn render_file(&self, input: &Path, output_dir: &Path) -> Result<PathBuf> {
        let record = MetadataRecord::from_json_file(input)?;
        let xml = self.render_record(&record)?;

        let mut file_name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
        file_name.push(".xml");
        let output_path = output_dir.join(file_name);
        std::fs::write(&output_path, xml)?;

        Ok(output_path)
    }

    fn render_record(&self, record: &MetadataRecord) -> Result<String> {
        if self.strict {
            record.validate()?;
        }
        self.renderer.render(record)
    }
}

/// Statistics from a batch render.
#[derive(Debug, Clone, Default)]
pub struct BatchStats {
    /// Number of files successfully rendered.
    pub rendered: usize,
    /// Number of files that failed.
    pub failed: usize,
    /// Total number of files attempted.
    pub total: usize,
    /// Failed inputs with their error messages.
    pub failures: Vec<(PathBuf, String)>,
}

impl BatchStats {
    /// Check if every file was rendered.
    pub fn is_complete(&self) -> bool {
        self.failed == 0 && self.rendered == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderOptions;

    const VALID: &str = r#"{
        "doi": "10.1234/x",
        "creators": ["Jane Doe"],
        "title": "T",
        "publisher": "P",
        "publication_year": 2020,
        "languages": ["en"],
        "resource_type": "Text",
        "descriptions": ["d1"]
    }"#;

    fn write_inputs(dir: &Path, files: &[(&str, &str)]) -> Vec<PathBuf> {
        files
            .iter()
            .map(|(name, body)| {
                let path = dir.join(name);
                std::fs::write(&path, body).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_render_files() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        let inputs = write_inputs(
            input_dir.path(),
            &[("a.json", VALID), ("b.json", VALID), ("broken.json", "{not json")],
        );

        let mut calls = Vec::new();
        let stats = BatchRenderer::default()
            .render_files(&inputs, output_dir.path(), |done, total| calls.push((done, total)))
            .unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.rendered, 2);
        assert_eq!(stats.failed, 1);
        assert!(!stats.is_complete());
        assert!(stats.failures[0].0.ends_with("broken.json"));

        assert_eq!(calls.len(), 3);
        assert!(calls.contains(&(3, 3)));

        let xml = std::fs::read_to_string(output_dir.path().join("a.xml")).unwrap();
        assert!(xml.contains(r#"<identifier identifierType="DOI">10.1234/x</identifier>"#));
        assert!(output_dir.path().join("b.xml").exists());
        assert!(!output_dir.path().join("broken.xml").exists());
    }

    #[test]
    fn test_strict_rejects_incomplete() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        let inputs = write_inputs(
            input_dir.path(),
            &[("ok.json", VALID), ("partial.json", r#"{"doi": "10.1234/y"}"#)],
        );

        let lenient = BatchRenderer::default()
            .render_files(&inputs, output_dir.path(), |_, _| {})
            .unwrap();
        assert!(lenient.is_complete());

        let strict = BatchRenderer::default()
            .strict(true)
            .render_files(&inputs, output_dir.path(), |_, _| {})
            .unwrap();
        assert_eq!(strict.rendered, 1);
        assert_eq!(strict.failed, 1);
        assert!(strict.failures[0].1.contains("title"));
    }

    #[test]
    fn test_render_to_strings_keeps_order() {
        let records: Vec<_> = (0..16)
            .map(|i| MetadataRecord::builder(format!("10.1234/{}", i)).build())
            .collect();

        let outputs = BatchRenderer::new(RecordRenderer::with_options(RenderOptions::compact()))
            .render_to_strings(&records);

        assert_eq!(outputs.len(), 16);
        for (i, xml) in outputs.iter().enumerate() {
            let xml = xml.as_ref().unwrap();
            assert!(xml.contains(&format!(">10.1234/{}</identifier>", i)));
        }
    }
}

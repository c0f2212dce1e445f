//! Per-document and batch drivers.
//!
//! A [`Pipeline`] bundles every tunable of the system: how PDFs are read,
//! how headings are classified and filtered, how sections are ranked and
//! how results are written. The drivers here are the only code that touches
//! the filesystem apart from the parser.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::analysis::{
    AssembledOutline, ClassifierConfig, HeadingClassifier, Lexicon, OutlineAssembler,
    OutlineOptions, RankOptions, RelevanceRanker, SectionSegmenter, TitlePolicy,
};
use crate::detect::{find_pdfs, Discovery};
use crate::error::Result;
use crate::model::{CollectionReport, DocumentOutline, FragmentStream, RunMetadata, Section};
use crate::parser::{ParseOptions, PdfParser};
use crate::render::{write_json, JsonFormat};

/// Timestamp layout of the collection report metadata.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Options for processing many documents at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Process documents on the rayon thread pool
    pub parallel: bool,
    /// JSON layout of written files
    pub format: JsonFormat,
}

impl BatchOptions {
    /// Create batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the JSON layout.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            format: JsonFormat::Pretty,
        }
    }
}

/// Outcome of writing one document's outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineFile {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Number of outline entries written
    pub entries: usize,
    /// The document could not be read (an empty outline was written instead)
    /// or its JSON could not be written
    pub failed: bool,
}

/// Outcome of a directory run in single-document mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub files: Vec<OutlineFile>,
}

impl BatchSummary {
    /// Number of documents processed.
    pub fn processed(&self) -> usize {
        self.files.len()
    }

    /// Documents that fell back to an empty outline or could not be written.
    pub fn failed(&self) -> impl Iterator<Item = &OutlineFile> {
        self.files.iter().filter(|f| f.failed)
    }
}

/// Configured driver for outline extraction and collection ranking.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{OutlineOptions, Pipeline};
///
/// let pipeline = Pipeline::new()
///     .with_outline_options(OutlineOptions::new().with_max_entries(200));
/// let outline = pipeline.extract_outline("report.pdf").unwrap();
/// println!("{} headings", outline.outline.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    parse_options: ParseOptions,
    classifier_config: ClassifierConfig,
    lexicon: Lexicon,
    outline_options: OutlineOptions,
    rank_options: RankOptions,
    title_policy: TitlePolicy,
    batch_options: BatchOptions,
}

impl Pipeline {
    /// Create a pipeline with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set classifier thresholds and limits.
    pub fn with_classifier_config(mut self, config: ClassifierConfig) -> Self {
        self.classifier_config = config;
        self
    }

    /// Set the word lists used by the classifier and the assembler.
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Set outline assembly options.
    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.outline_options = options;
        self
    }

    /// Set ranking options.
    pub fn with_rank_options(mut self, options: RankOptions) -> Self {
        self.rank_options = options;
        self
    }

    /// Set the title policy.
    pub fn with_title_policy(mut self, policy: TitlePolicy) -> Self {
        self.title_policy = policy;
        self
    }

    /// Set batch options.
    pub fn with_batch_options(mut self, options: BatchOptions) -> Self {
        self.batch_options = options;
        self
    }

    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    pub fn batch_options(&self) -> &BatchOptions {
        &self.batch_options
    }

    /// The heading classifier this pipeline uses.
    pub fn classifier(&self) -> HeadingClassifier {
        HeadingClassifier::with_config(self.classifier_config.clone(), self.lexicon.clone())
    }

    fn assembler(&self) -> OutlineAssembler {
        OutlineAssembler::with_options(self.outline_options.clone(), self.lexicon.clone())
    }

    fn ranker(&self) -> RelevanceRanker {
        RelevanceRanker::with_options(self.rank_options.clone())
    }

    /// Classify and assemble the outline of an in-memory fragment stream.
    pub fn outline_from_stream(&self, stream: &FragmentStream) -> AssembledOutline {
        let headings = self.classifier().classify_all(stream.fragments());
        self.assembler().assemble(headings)
    }

    /// Build the single-document artifact for `file_name`.
    pub fn document_outline(
        &self,
        file_name: &str,
        raw_title: Option<&str>,
        stream: &FragmentStream,
    ) -> DocumentOutline {
        let assembled = self.outline_from_stream(stream);
        if assembled.overrun() {
            log::warn!(
                "{}: outline capped at {} entries, {} dropped",
                file_name,
                assembled.entries.len(),
                assembled.truncated
            );
        }

        let title = self.title_policy.clean(raw_title, file_name);
        DocumentOutline::new(title, assembled.entries)
    }

    /// Slice an in-memory fragment stream into sections.
    pub fn sections_from_stream(&self, stream: &FragmentStream) -> Vec<Section> {
        let fragments: Vec<_> = stream.fragments().cloned().collect();
        let classifier = self.classifier();
        SectionSegmenter::new(&classifier).segment(&fragments)
    }

    /// Read a PDF into its metadata title and fragment stream.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<(Option<String>, FragmentStream)> {
        let parser = PdfParser::open_with_options(path, self.parse_options.clone())?;
        let stream = parser.fragments()?;
        Ok((parser.title(), stream))
    }

    /// Extract the outline of one PDF.
    pub fn extract_outline<P: AsRef<Path>>(&self, path: P) -> Result<DocumentOutline> {
        let path = path.as_ref();
        let (title, stream) = self.load(path)?;
        log::debug!("{}: {} fragments", path.display(), stream.len());
        Ok(self.document_outline(&file_name(path), title.as_deref(), &stream))
    }

    /// Extract the sections of one PDF.
    pub fn extract_sections<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Section>> {
        let (_, stream) = self.load(path)?;
        Ok(self.sections_from_stream(&stream))
    }

    /// Extract an outline, substituting an empty one when the PDF is unreadable.
    pub fn outline_or_empty<P: AsRef<Path>>(&self, path: P) -> (DocumentOutline, bool) {
        let path = path.as_ref();
        match self.extract_outline(path) {
            Ok(outline) => (outline, false),
            Err(e) => {
                log::warn!("Failed to process {}: {}", path.display(), e);
                (DocumentOutline::empty(), true)
            }
        }
    }

    /// Write `<output_dir>/<stem>.json` for one PDF.
    pub fn write_outline<P, Q>(&self, input: P, output_dir: Q) -> Result<OutlineFile>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let input = input.as_ref();
        let output = outline_target(input, output_dir.as_ref());

        let (outline, failed) = self.outline_or_empty(input);
        write_json(&outline, &output, self.batch_options.format)?;

        Ok(OutlineFile {
            input: input.to_path_buf(),
            output,
            entries: outline.outline.len(),
            failed,
        })
    }

    /// Write one outline JSON per PDF found directly inside `input_dir`.
    pub fn process_directory<P, Q>(&self, input_dir: P, output_dir: Q) -> Result<BatchSummary>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        let pdfs = find_pdfs(input_dir, Discovery::Flat)?;
        log::debug!("Found {} PDFs", pdfs.len());

        // A failed write is recorded against its document; the batch goes on
        let write = |pdf: &PathBuf| {
            self.write_outline(pdf, output_dir).unwrap_or_else(|e| {
                let output = outline_target(pdf, output_dir);
                log::warn!("Failed to write {}: {}", output.display(), e);
                OutlineFile {
                    input: pdf.clone(),
                    output,
                    entries: 0,
                    failed: true,
                }
            })
        };

        let files = if self.batch_options.parallel {
            pdfs.par_iter().map(write).collect()
        } else {
            pdfs.iter().map(write).collect()
        };

        Ok(BatchSummary { files })
    }

    /// Segment every PDF; unreadable documents contribute no sections.
    pub fn collect_sections(&self, paths: &[PathBuf]) -> Vec<(String, Vec<Section>)> {
        let extract = |path: &PathBuf| {
            let sections = self.extract_sections(path).unwrap_or_else(|e| {
                log::warn!("Skipping {}: {}", path.display(), e);
                Vec::new()
            });
            (file_name(path), sections)
        };

        if self.batch_options.parallel {
            paths.par_iter().map(extract).collect()
        } else {
            paths.iter().map(extract).collect()
        }
    }

    /// Rank already segmented documents, given in encounter order.
    pub fn report(
        &self,
        persona: &str,
        job: &str,
        documents: Vec<(String, Vec<Section>)>,
    ) -> CollectionReport {
        let mut input_documents: Vec<String> =
            documents.iter().map(|(name, _)| name.clone()).collect();
        input_documents.sort();
        input_documents.dedup();

        let ranking = self.ranker().rank(persona, job, documents);

        CollectionReport {
            metadata: RunMetadata {
                input_documents,
                persona: persona.to_string(),
                job_to_be_done: job.to_string(),
                processing_timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            },
            ranking,
        }
    }

    /// Rank the sections of the given PDFs against a persona and a job.
    pub fn rank_files(&self, paths: &[PathBuf], persona: &str, job: &str) -> CollectionReport {
        self.report(persona, job, self.collect_sections(paths))
    }

    /// Rank every PDF under `input_dir`, walking subdirectories.
    pub fn rank_directory<P: AsRef<Path>>(
        &self,
        input_dir: P,
        persona: &str,
        job: &str,
    ) -> Result<CollectionReport> {
        let pdfs = find_pdfs(input_dir, Discovery::Recursive)?;
        log::debug!("Ranking {} PDFs", pdfs.len());
        Ok(self.rank_files(&pdfs, persona, job))
    }
}

/// Final path component as a display name.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// `<output_dir>/<stem>.json` for one input PDF.
fn outline_target(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{}.json", stem))
}

//! Serialization for sample-pattern pools
//!
//! Text format with a version header, one pool per file:
//!
//! ```text
//! \nPoissonPattern Version 1\n
//! window = W, samples = N, levels = L, patterns = P\n
//! levels = l0 l1 ... (per pattern)\n
//! offsets = dx0 dy0 dx1 dy1 ... (per pattern)\n
//! ```
//!
//! Offsets and cut-points are integers, so the round-trip is exact: a pool
//! written and read back compares equal. This is an opt-in cache for
//! expensive pattern generation; nothing in the crate writes implicitly.

use crate::error::{SamplerError, SamplerResult};
use crate::multires::{MultiResSamplers, PatternSampler};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Pattern file format version
const PATTERN_VERSION: i32 = 1;

/// Maximum input size in bytes
const MAX_INPUT_SIZE: u64 = 100_000_000;

impl MultiResSamplers {
    /// Write the pool to a writer
    pub fn write_to_writer(&self, writer: &mut impl Write) -> SamplerResult<()> {
        writeln!(writer, "\nPoissonPattern Version {PATTERN_VERSION}")?;
        writeln!(
            writer,
            "window = {}, samples = {}, levels = {}, patterns = {}",
            self.window(),
            self.n_samples(),
            self.n_levels(),
            self.patterns().len()
        )?;

        for pattern in self.patterns() {
            write!(writer, "levels =")?;
            for l in pattern.levels() {
                write!(writer, " {l}")?;
            }
            writeln!(writer)?;

            write!(writer, "offsets =")?;
            for o in pattern.offsets() {
                write!(writer, " {o}")?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }

    /// Write the pool to a file
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> SamplerResult<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer)
    }

    /// Write the pool to a byte vector
    pub fn write_to_bytes(&self) -> SamplerResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }

    /// Read a pool from a reader
    pub fn read_from_reader(reader: &mut impl Read) -> SamplerResult<Self> {
        let mut buf = Vec::new();
        reader.take(MAX_INPUT_SIZE + 1).read_to_end(&mut buf)?;
        if buf.len() as u64 > MAX_INPUT_SIZE {
            return Err(SamplerError::Decode(format!(
                "input too large: exceeds maximum allowed size of {MAX_INPUT_SIZE} bytes"
            )));
        }
        Self::read_from_bytes(&buf)
    }

    /// Read a pool from a file
    pub fn read_from_file(path: impl AsRef<Path>) -> SamplerResult<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::read_from_reader(&mut BufReader::new(file))
    }

    /// Read a pool from a byte slice
    pub fn read_from_bytes(data: &[u8]) -> SamplerResult<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| SamplerError::Decode(format!("pattern file is not valid UTF-8: {e}")))?;

        let mut lines = text.lines().filter(|l| !l.trim().is_empty());

        // Version line
        let version_prefix = "PoissonPattern Version ";
        let version_line = lines
            .next()
            .ok_or_else(|| SamplerError::Decode("version line not found".to_string()))?;
        let version: i32 = version_line
            .trim()
            .strip_prefix(version_prefix)
            .ok_or_else(|| SamplerError::Decode("version line not found".to_string()))?
            .trim()
            .parse()
            .map_err(|e| SamplerError::Decode(format!("failed to parse version: {e}")))?;
        if version != PATTERN_VERSION {
            return Err(SamplerError::Decode(format!(
                "invalid pattern version: {version}"
            )));
        }

        // Header line: "window = W, samples = N, levels = L, patterns = P"
        let header = lines
            .next()
            .ok_or_else(|| SamplerError::Decode("header line not found".to_string()))?;
        let parts: Vec<&str> = header.split(',').collect();
        if parts.len() < 4 {
            return Err(SamplerError::Decode(format!(
                "invalid header line: '{}'",
                header.trim()
            )));
        }
        let window = parse_key_value(parts[0], "window")? as u32;
        let n_samples = parse_key_value(parts[1], "samples")?;
        let n_levels = parse_key_value(parts[2], "levels")?;
        let n_patterns = parse_key_value(parts[3], "patterns")?;

        // Per-pattern levels/offsets lines
        let mut patterns = Vec::with_capacity(n_patterns);
        for k in 0..n_patterns {
            let levels_line = lines.next().ok_or_else(|| {
                SamplerError::Decode(format!("levels line for pattern {k} not found"))
            })?;
            let levels = parse_int_list::<usize>(levels_line, "levels")?;

            let offsets_line = lines.next().ok_or_else(|| {
                SamplerError::Decode(format!("offsets line for pattern {k} not found"))
            })?;
            let offsets = parse_int_list::<i32>(offsets_line, "offsets")?;

            patterns.push(PatternSampler::from_parts(offsets, levels)?);
        }

        MultiResSamplers::from_parts(window, n_samples, n_levels, patterns)
    }
}

/// Parse "key = value" where value is a non-negative integer
fn parse_key_value(s: &str, key: &str) -> SamplerResult<usize> {
    let val_str = s
        .trim()
        .split('=')
        .nth(1)
        .ok_or_else(|| SamplerError::Decode(format!("missing '=' in {key} field")))?
        .trim();
    val_str
        .parse()
        .map_err(|e| SamplerError::Decode(format!("failed to parse {key}: {e}")))
}

/// Parse "key = v0 v1 v2 ..." into an integer list
fn parse_int_list<T: std::str::FromStr>(line: &str, key: &str) -> SamplerResult<Vec<T>>
where
    T::Err: std::fmt::Display,
{
    let values = line
        .trim()
        .strip_prefix(key)
        .and_then(|rest| rest.trim_start().strip_prefix('='))
        .ok_or_else(|| SamplerError::Decode(format!("expected '{key} =' line")))?;

    values
        .split_whitespace()
        .map(|v| {
            v.parse::<T>()
                .map_err(|e| SamplerError::Decode(format!("failed to parse {key} entry: {e}")))
        })
        .collect()
}

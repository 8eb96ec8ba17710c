//! CLI commands for LOC file operations

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use console::style;

use crate::cli::progress::{print_done, print_progress};
use crate::converter::{
    CodecOptions, ConvertProgress, convert_loc_to_text_with_progress,
    convert_text_to_loc_with_progress,
};
use crate::formats::loc::{LocIndexBlock, read_loc};

/// Export a LOC file to text
pub fn export(loc: &Path, text: &Path, options: &CodecOptions, quiet: bool) -> anyhow::Result<()> {
    ensure_exists(loc)?;
    let started = Instant::now();

    convert_loc_to_text_with_progress(loc, text, options, &|p: &ConvertProgress| {
        if !quiet {
            print_progress(p);
        }
    })
    .with_context(|| format!("Failed to export {}", loc.display()))?;

    if !quiet {
        print_done(started.elapsed());
    }
    Ok(())
}

/// Import a text file, rebuilding `dest` from the `template` LOC file
pub fn import(
    text: &Path,
    template: &Path,
    dest: &Path,
    options: &CodecOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    ensure_exists(text)?;
    ensure_exists(template)?;
    let started = Instant::now();

    convert_text_to_loc_with_progress(text, template, dest, options, &|p: &ConvertProgress| {
        if !quiet {
            print_progress(p);
        }
    })
    .with_context(|| {
        format!(
            "Failed to import {} into {} (template {})",
            text.display(),
            dest.display(),
            template.display()
        )
    })?;

    if !quiet {
        print_done(started.elapsed());
    }
    Ok(())
}

/// Print the structure of a LOC file
pub fn info(loc: &Path) -> anyhow::Result<()> {
    ensure_exists(loc)?;
    let file = read_loc(loc).with_context(|| format!("Failed to read {}", loc.display()))?;

    println!("{}", style(loc.display()).bold());
    println!("  Flags:       {:#010x}", file.flags());
    println!("  Header size: {}", file.header.chunk_size);
    match &file.index {
        Some(index) => println!("  Index block: {}", index_summary(index)),
        None => println!("  Index block: none"),
    }
    println!("  Chunks:      {}", file.chunks.len());

    for (chunk, offset) in file.chunks.iter().zip(&file.header.chunk_offsets) {
        println!(
            "    {} at {offset:#x}: size {}, language {:#x}, {} strings",
            style(chunk.section_id()).cyan(),
            chunk.chunk_size,
            chunk.language_id,
            chunk.strings.len()
        );
    }
    println!("  Strings:     {}", file.string_count());

    Ok(())
}

/// One-line description of a `LOCI` block and its entries
fn index_summary(index: &LocIndexBlock) -> String {
    let entries: Vec<String> = index
        .entries()
        .iter()
        .map(|(a, b)| format!("{a}:{b}"))
        .collect();
    format!(
        "{} bytes, {} entries [{}]",
        index.as_bytes().len(),
        index.entry_count().unwrap_or(0),
        entries.join(", ")
    )
}

fn ensure_exists(path: &Path) -> anyhow::Result<()> {
    if !path.is_file() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    Ok(())
}

//! Input file handling and path utilities.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use duotone_core::models::ContainerFormat;

/// Supported image extensions for batch processing
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif"];

/// Determine output path based on input, output dir, and export format
///
/// # Arguments
/// * `input` - Input file path
/// * `out` - Optional output directory or file path
/// * `suffix` - Appended to the input stem, e.g. "sepia"
/// * `format` - Export container; picks the extension
///
/// # Returns
/// `<stem>_<suffix>.<ext>` next to the input or inside `out` when it is a
/// directory; `out` itself when it names a file.
pub fn determine_output_path(
    input: &Path,
    out: &Option<PathBuf>,
    suffix: &str,
    format: ContainerFormat,
) -> Result<PathBuf, String> {
    let filename = input
        .file_stem()
        .ok_or("Invalid input filename")?
        .to_string_lossy();
    let output_name = format!("{}_{}.{}", filename, suffix, format.extension());

    match out {
        Some(out_path) if out_path.is_dir() => Ok(out_path.join(output_name)),
        Some(out_path) => Ok(out_path.clone()),
        None => {
            let parent = input.parent().unwrap_or(Path::new("."));
            Ok(parent.join(output_name))
        }
    }
}

/// Export format for a single-file command.
///
/// When `out` names a file (not a directory) with a recognised image
/// extension, that extension decides the format; an explicit `--format`
/// that disagrees with it is an error. Otherwise `explicit`, then
/// `fallback`.
pub fn output_format(
    out: &Option<PathBuf>,
    explicit: Option<ContainerFormat>,
    fallback: ContainerFormat,
) -> Result<ContainerFormat, String> {
    let from_extension = out
        .as_ref()
        .filter(|path| !path.is_dir())
        .and_then(|path| path.extension())
        .and_then(|ext| ext.to_str())
        .and_then(ContainerFormat::from_extension);

    match (from_extension, explicit) {
        (Some(ext_format), Some(format)) if ext_format != format => Err(format!(
            "Output file extension implies {} but the requested format is {}",
            ext_format, format
        )),
        (Some(ext_format), _) => Ok(ext_format),
        (None, Some(format)) => Ok(format),
        (None, None) => Ok(fallback),
    }
}

/// Output paths for a batch, one entry per input, in input order.
///
/// Inputs that would land on the same output (`photo.png` and `photo.bmp`,
/// or `a/x.png` and `b/x.png` into one directory) get the source extension
/// added to the name (`photo_png_sepia.png`). Any clash left after that is
/// returned as an error for every input involved, so nothing is silently
/// overwritten.
pub fn plan_outputs(
    inputs: &[PathBuf],
    out: &Option<PathBuf>,
    suffix: &str,
    format: ContainerFormat,
) -> Vec<Result<PathBuf, String>> {
    let mut planned: Vec<Result<PathBuf, String>> = inputs
        .iter()
        .map(|input| determine_output_path(input, out, suffix, format))
        .collect();

    let clashing = clashing_indices(&planned);
    for &i in &clashing {
        let source_ext = inputs[i]
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let qualified = format!("{}_{}", source_ext, suffix);
        planned[i] = determine_output_path(&inputs[i], out, &qualified, format);
    }

    for i in clashing_indices(&planned) {
        let message = match &planned[i] {
            Ok(path) => format!(
                "Output {} would be written by more than one input",
                path.display()
            ),
            Err(_) => continue,
        };
        planned[i] = Err(message);
    }

    planned
}

fn clashing_indices(planned: &[Result<PathBuf, String>]) -> Vec<usize> {
    let mut by_path: HashMap<&Path, Vec<usize>> = HashMap::new();
    for (i, path) in planned.iter().enumerate() {
        if let Ok(path) = path {
            by_path.entry(path.as_path()).or_default().push(i);
        }
    }
    let mut clashing: Vec<usize> = by_path
        .into_values()
        .filter(|indices| indices.len() > 1)
        .flatten()
        .collect();
    clashing.sort_unstable();
    clashing
}

/// Expand a list of inputs (files and directories) into a list of image files.
///
/// Directories are scanned for supported image files. If `recursive` is
/// true, subdirectories are also scanned.
pub fn expand_inputs(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            collect_images_from_dir(input, recursive, &mut files)?;
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(format!("Path not found: {}", input.display()));
        }
    }

    // Sort for consistent ordering; a file named twice is processed once
    files.sort();
    files.dedup();
    Ok(files)
}

fn collect_images_from_dir(
    dir: &Path,
    recursive: bool,
    files: &mut Vec<PathBuf>,
) -> Result<(), String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {}", dir.display(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Error reading directory entry: {}", e))?;
        let path = entry.path();

        if path.is_dir() && recursive {
            collect_images_from_dir(&path, recursive, files)?;
        } else if path.is_file() && is_supported(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_output_path_next_to_input() {
        let path = determine_output_path(
            Path::new("/photos/beach.jpg"),
            &None,
            "sepia",
            ContainerFormat::Png,
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/photos/beach_sepia.png"));
    }

    #[test]
    fn test_output_path_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = Some(dir.path().to_path_buf());
        let path =
            determine_output_path(Path::new("in/cat.png"), &out, "grayscale", ContainerFormat::Jpeg)
                .unwrap();
        assert_eq!(path, dir.path().join("cat_grayscale.jpg"));
    }

    #[test]
    fn test_output_path_explicit_file() {
        let out = Some(PathBuf::from("/tmp/does-not-exist-yet/final.webp"));
        let path =
            determine_output_path(Path::new("a.png"), &out, "sepia", ContainerFormat::WebP)
                .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/does-not-exist-yet/final.webp"));
    }

    #[test]
    fn test_output_format_follows_output_extension() {
        let out = Some(PathBuf::from("final.jpg"));
        assert_eq!(
            output_format(&out, None, ContainerFormat::Png).unwrap(),
            ContainerFormat::Jpeg
        );
        assert_eq!(
            output_format(&out, Some(ContainerFormat::Jpeg), ContainerFormat::Png).unwrap(),
            ContainerFormat::Jpeg
        );
        let err =
            output_format(&out, Some(ContainerFormat::WebP), ContainerFormat::Png).unwrap_err();
        assert!(err.contains("implies JPEG"), "{}", err);
    }

    #[test]
    fn test_output_format_without_file_extension() {
        assert_eq!(
            output_format(&None, None, ContainerFormat::Bmp).unwrap(),
            ContainerFormat::Bmp
        );
        assert_eq!(
            output_format(&None, Some(ContainerFormat::Gif), ContainerFormat::Bmp).unwrap(),
            ContainerFormat::Gif
        );
        // Unknown extension: keep the requested format
        let out = Some(PathBuf::from("result.out"));
        assert_eq!(
            output_format(&out, None, ContainerFormat::WebP).unwrap(),
            ContainerFormat::WebP
        );

        // A directory is never an extension hint
        let dir = tempfile::tempdir().unwrap();
        let named_dir = dir.path().join("exports.png");
        fs::create_dir(&named_dir).unwrap();
        assert_eq!(
            output_format(&Some(named_dir), None, ContainerFormat::Gif).unwrap(),
            ContainerFormat::Gif
        );
    }

    #[test]
    fn test_plan_outputs_same_stem_different_extension() {
        let dir = tempfile::tempdir().unwrap();
        let out = Some(dir.path().to_path_buf());
        let inputs = vec![
            PathBuf::from("in/photo.bmp"),
            PathBuf::from("in/photo.png"),
            PathBuf::from("in/other.png"),
        ];

        let planned = plan_outputs(&inputs, &out, "sepia", ContainerFormat::Png);
        assert_eq!(planned[0], Ok(dir.path().join("photo_bmp_sepia.png")));
        assert_eq!(planned[1], Ok(dir.path().join("photo_png_sepia.png")));
        assert_eq!(planned[2], Ok(dir.path().join("other_sepia.png")));
    }

    #[test]
    fn test_plan_outputs_same_name_in_different_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let out = Some(dir.path().to_path_buf());
        let inputs = vec![PathBuf::from("a/x.png"), PathBuf::from("b/x.png")];

        let planned = plan_outputs(&inputs, &out, "grayscale", ContainerFormat::Png);
        assert!(planned.iter().all(|p| p.is_err()));
        assert!(planned[0].as_ref().unwrap_err().contains("more than one input"));

        // Without -o each output stays beside its own input
        let planned = plan_outputs(&inputs, &None, "grayscale", ContainerFormat::Png);
        assert_eq!(planned[0], Ok(PathBuf::from("a/x_grayscale.png")));
        assert_eq!(planned[1], Ok(PathBuf::from("b/x_grayscale.png")));
    }

    #[test]
    fn test_expand_inputs_dedups_repeated_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.png");
        fs::write(&file, b"x").unwrap();
        let files = expand_inputs(&[file.clone(), file.clone()], false).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_expand_inputs_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.PNG"), b"x").unwrap();
        fs::write(dir.path().join("a.jpeg"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("c.gif"), b"x").unwrap();

        let flat = expand_inputs(&[dir.path().to_path_buf()], false).unwrap();
        assert_eq!(
            flat,
            vec![dir.path().join("a.jpeg"), dir.path().join("b.PNG")]
        );

        let deep = expand_inputs(&[dir.path().to_path_buf()], true).unwrap();
        assert_eq!(deep.len(), 3);
        assert!(deep.contains(&nested.join("c.gif")));
    }

    #[test]
    fn test_expand_inputs_missing_path() {
        let err = expand_inputs(&[PathBuf::from("/nonexistent/img.png")], false).unwrap_err();
        assert!(err.contains("Path not found"));
    }
}

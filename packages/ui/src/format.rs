//! Display helpers for file rows.

/// "1.5 MB"-style size text for records that carry no preformatted display.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let exponent = ((bytes as f64).log(1024.0).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    format!("{value:.1} {}", UNITS[exponent])
}

/// Font Awesome icon class for a file name, by extension.
pub fn file_icon(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "fa-file-pdf",
        "doc" | "docx" => "fa-file-word",
        "ppt" | "pptx" => "fa-file-powerpoint",
        "xls" | "xlsx" => "fa-file-excel",
        "jpg" | "jpeg" | "png" | "gif" => "fa-file-image",
        "mp4" | "avi" | "mov" => "fa-file-video",
        "txt" => "fa-file-alt",
        _ => "fa-file",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_scale_through_the_units() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512.0 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_file_size(2 * 1024 * 1024 * 1024), "2.0 GB");
    }

    #[test]
    fn icons_follow_the_extension() {
        assert_eq!(file_icon("notes.pdf"), "fa-file-pdf");
        assert_eq!(file_icon("slides.PPTX"), "fa-file-powerpoint");
        assert_eq!(file_icon("photo.jpeg"), "fa-file-image");
        assert_eq!(file_icon("readme.txt"), "fa-file-alt");
        assert_eq!(file_icon("archive.zip"), "fa-file");
        assert_eq!(file_icon("no-extension"), "fa-file");
    }
}

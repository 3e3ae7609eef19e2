// Turns a caller-supplied reference (raw file id or a Drive URL) into a
// canonical file id. Pure parsing, no network.

use super::models::DriveError;

/// Known URL path markers, tried in order. First match wins.
const PATH_MARKERS: [&str; 4] = [
    "/document/d/",
    "/spreadsheets/d/",
    "/presentation/d/",
    "/file/d/",
];

/// Extracts the canonical file id from `reference`.
///
/// Recognized shapes are the Docs/Sheets/Slides view links, the generic
/// `/file/d/{id}` link, and the query-parameter form (`open?id={id}`).
/// Anything without URL markers is treated as a literal id.
pub fn resolve(reference: &str) -> Result<String, DriveError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(DriveError::InvalidReference(
            "reference is empty".to_string(),
        ));
    }

    for marker in PATH_MARKERS {
        if let Some(start) = reference.find(marker) {
            let after = &reference[start + marker.len()..];
            let end = after
                .find(['/', '?', '#'])
                .unwrap_or(after.len());
            let id = &after[..end];
            if id.is_empty() {
                return Err(DriveError::InvalidReference(format!(
                    "URL has an empty file id segment: {reference}"
                )));
            }
            return Ok(id.to_string());
        }
    }

    if let Some(id) = query_param_id(reference) {
        return Ok(id);
    }

    // No recognized URL shape. A literal id never contains separators.
    if reference.contains('/') || reference.contains(char::is_whitespace) {
        return Err(DriveError::InvalidReference(format!(
            "no file id found in: {reference}"
        )));
    }

    Ok(reference.to_string())
}

/// Handles the legacy `open?id={id}` style of sharing link.
fn query_param_id(reference: &str) -> Option<String> {
    let query_start = reference.find('?')?;
    let query = &reference[query_start + 1..];
    for pair in query.split('&') {
        if let Some(id) = pair.strip_prefix("id=") {
            let id = id.split('#').next().unwrap_or(id);
            if !id.is_empty() {
                return Some(id.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_document_url() {
        let url = "https://docs.google.com/document/d/1abc123xyz/edit";
        assert_eq!(resolve(url).unwrap(), "1abc123xyz");
    }

    #[test]
    fn test_resolve_spreadsheet_url() {
        let url = "https://docs.google.com/spreadsheets/d/1SheetId456/edit#gid=0";
        assert_eq!(resolve(url).unwrap(), "1SheetId456");
    }

    #[test]
    fn test_resolve_presentation_url() {
        let url = "https://docs.google.com/presentation/d/1SlideId789/edit?usp=sharing";
        assert_eq!(resolve(url).unwrap(), "1SlideId789");
    }

    #[test]
    fn test_resolve_file_url() {
        let url = "https://drive.google.com/file/d/1FileId000/view";
        assert_eq!(resolve(url).unwrap(), "1FileId000");
    }

    #[test]
    fn test_resolve_query_param_url() {
        let url = "https://drive.google.com/open?id=1QueryId111&usp=drive_link";
        assert_eq!(resolve(url).unwrap(), "1QueryId111");
    }

    #[test]
    fn test_query_param_id_stops_at_fragment() {
        let url = "https://drive.google.com/open?id=1QueryId111#heading=h.abc";
        assert_eq!(resolve(url).unwrap(), "1QueryId111");
    }

    #[test]
    fn test_url_with_no_path_suffix() {
        let url = "https://docs.google.com/document/d/1abc123xyz";
        assert_eq!(resolve(url).unwrap(), "1abc123xyz");
    }

    #[test]
    fn test_bare_id_passes_through() {
        assert_eq!(resolve("1abc123xyz_-").unwrap(), "1abc123xyz_-");
    }

    #[test]
    fn test_round_trip_for_each_shape() {
        let id = "1RoundTripId";
        for marker in super::PATH_MARKERS {
            let url = format!("https://docs.google.com{marker}{id}/edit");
            assert_eq!(resolve(&url).unwrap(), id, "shape: {marker}");
        }
    }

    #[test]
    fn test_empty_reference_is_rejected() {
        assert!(matches!(resolve(""), Err(DriveError::InvalidReference(_))));
        assert!(matches!(
            resolve("   "),
            Err(DriveError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_url_with_empty_id_segment_is_rejected() {
        let url = "https://docs.google.com/document/d//edit";
        assert!(matches!(
            resolve(url),
            Err(DriveError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_unrecognized_url_is_rejected() {
        assert!(matches!(
            resolve("https://example.com/some/page"),
            Err(DriveError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_input_with_spaces_is_rejected() {
        assert!(matches!(
            resolve("not an id"),
            Err(DriveError::InvalidReference(_))
        ));
    }
}

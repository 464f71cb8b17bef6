//! Mojibake repair for decoded lines
//!
//! The exports were written UTF-8 but read back as Windows-1252 at
//! some point upstream, so accented characters arrive as two-byte
//! garble (`Ã³` for `ó`, etc.). The replacement table below maps the
//! known sequences back to the intended characters.

/// Known mis-decoded sequences and their intended replacements.
///
/// Order matters and must stay stable: `ï¿½` has to be tried before
/// the bare `ï` and before the lone `�`, otherwise the shorter
/// entries would consume parts of the longer ones. Each entry is
/// applied in a single pass, never recursively.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("Ã³", "ó"),
    ("Ã¡", "á"),
    ("Ã©", "é"),
    ("Ãº", "ú"),
    ("Ã±", "ñ"),
    ("â", ""),
    ("ï¿½", "ú"),
    ("ï", "í"),
    ("N\u{FFFD}", "Nú"),
    ("\u{FFFD}", "ó"),
];

/// Repair known mojibake sequences in a line and trim surrounding
/// whitespace. Pure and deterministic.
pub fn normalize_line(line: &str) -> String {
    let mut normalized = line.to_string();
    for (garbled, replacement) in REPLACEMENTS {
        if normalized.contains(garbled) {
            normalized = normalized.replace(garbled, replacement);
        }
    }
    normalized.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repairs_double_encoded_accents() {
        assert_eq!(normalize_line("NÃºmero"), "Número");
        assert_eq!(normalize_line("RecepciÃ³n"), "Recepción");
        assert_eq!(normalize_line("CompaÃ±Ã­a lÃ­nea"), "Compañía línea");
    }

    #[test]
    fn test_replacement_char_after_n_becomes_nu() {
        assert_eq!(normalize_line("N\u{FFFD}mero: 123"), "Número: 123");
    }

    #[test]
    fn test_lone_replacement_char_becomes_o() {
        assert_eq!(normalize_line("recepci\u{FFFD}n"), "recepción");
    }

    #[test]
    fn test_single_pass_not_recursive() {
        // The output of one entry is never re-scanned by another
        let once = normalize_line("ï¿½ï¿½");
        assert_eq!(once, "úú");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize_line("  plain line \r\n"), "plain line");
    }

    #[test]
    fn test_clean_line_unchanged() {
        let line = "01/01/2024,123456789,Receptor X,Cedente Y,Asignatario Z,05/01/2024,Activo";
        assert_eq!(normalize_line(line), line);
    }
}

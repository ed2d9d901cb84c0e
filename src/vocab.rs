use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static DECODE_SPACE_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\A\s|\s\B|(\s)\b"));

/// Token-id-to-text mapping for consumers of decode results.
///
/// The expected file format is one `token id` pair per whitespace-separated
/// line, with the blank marked by the literal `<blk>` token.
#[derive(Debug)]
pub struct Vocabulary {
    tokens: Vec<String>,
    blank: i32,
}

impl Vocabulary {
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::from_text(&fs::read_to_string(path)?)
    }

    /// Parse `token id` pairs. Malformed lines are skipped, sparse ids are
    /// densified with empty gaps, SentencePiece `▁` becomes a space.
    pub fn from_text(content: &str) -> io::Result<Self> {
        let mut entries: Vec<(String, usize)> = Vec::new();
        let mut blank: Option<usize> = None;

        for line in content.lines() {
            let mut parts = line.split_whitespace();
            let token = match parts.next() {
                Some(token) => token,
                None => continue,
            };
            let id = match parts.next().and_then(|id| id.parse::<usize>().ok()) {
                Some(id) => id,
                None => {
                    log::warn!("Skipping malformed vocabulary line: {line:?}");
                    continue;
                }
            };

            if token == "<blk>" {
                blank = Some(id);
            }

            entries.push((token.replace('\u{2581}', " "), id));
        }

        let max_id = entries.iter().map(|(_, id)| *id).max().unwrap_or(0);
        let mut tokens = vec![String::new(); max_id + 1];
        for (token, id) in entries {
            if let Some(slot) = tokens.get_mut(id) {
                *slot = token;
            }
        }

        let blank = blank.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                "Missing <blk> token in vocabulary",
            )
        })? as i32;

        Ok(Self { tokens, blank })
    }

    pub fn size(&self) -> usize {
        self.tokens.len()
    }

    pub fn blank(&self) -> i32 {
        self.blank
    }

    pub fn token(&self, id: i32) -> Option<&str> {
        usize::try_from(id)
            .ok()
            .and_then(|id| self.tokens.get(id))
            .map(String::as_str)
    }

    /// Join the token strings for `ids`, dropping blank and out-of-range
    /// ids, and normalize whitespace.
    pub fn text(&self, ids: &[i32]) -> String {
        let joined: String = ids
            .iter()
            .filter(|&&id| id != self.blank)
            .filter_map(|&id| self.token(id))
            .collect();

        match &*DECODE_SPACE_RE {
            Ok(re) => re
                .replace_all(&joined, |caps: &regex::Captures| {
                    if caps.get(1).is_some() {
                        " "
                    } else {
                        ""
                    }
                })
                .to_string(),
            Err(_) => joined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tokens_and_detects_blank() {
        let vocab = Vocabulary::from_text("<blk> 0\n\u{2581}hey 1\n\u{2581}there 2\n").unwrap();
        assert_eq!(vocab.size(), 3);
        assert_eq!(vocab.blank(), 0);
        assert_eq!(vocab.token(1), Some(" hey"));
    }

    #[test]
    fn missing_blank_is_rejected() {
        let err = Vocabulary::from_text("\u{2581}hey 0\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let vocab = Vocabulary::from_text("<blk> 0\nnoid\n\u{2581}ok 1\n").unwrap();
        assert_eq!(vocab.size(), 2);
        assert_eq!(vocab.token(1), Some(" ok"));
    }

    #[test]
    fn sparse_ids_leave_empty_gaps() {
        let vocab = Vocabulary::from_text("<blk> 0\n\u{2581}far 3\n").unwrap();
        assert_eq!(vocab.size(), 4);
        assert_eq!(vocab.token(1), Some(""));
        assert_eq!(vocab.token(3), Some(" far"));
    }

    #[test]
    fn text_drops_sentinels_and_cleans_spaces() {
        let vocab =
            Vocabulary::from_text("<blk> 0\n\u{2581}hey 1\n\u{2581}there 2\nyou 3\n").unwrap();
        assert_eq!(vocab.text(&[0, 1, 2, 3, 0]), "hey thereyou");
        assert_eq!(vocab.text(&[0, 0]), "");
    }

    #[test]
    fn text_ignores_out_of_range_ids() {
        let vocab = Vocabulary::from_text("<blk> 0\n\u{2581}hi 1\n").unwrap();
        assert_eq!(vocab.text(&[0, 1, 99, -5, 0]), "hi");
    }
}

use std::collections::BTreeSet;

use crate::error::Error;
use crate::trie::EdgeKind;

/// Turn a glob pattern into the stream of edge descriptors `Trie::augment`
/// walks.
///
/// The pattern is split into `/`-delimited segments first. A leading or
/// trailing empty segment is allowed (a glob may start or end with `/`,
/// same as a path), but an interior empty segment — two consecutive `/`s —
/// is rejected as `MalformedGlob`, mirroring `tokenize_path`'s handling of
/// `//`. Every `/` still tokenizes to a `Sep`, including the one right
/// after a `**` segment: the matcher, not the tokenizer, is what treats
/// that particular separator as optional when zero directories are chosen
/// for the double-star.
pub(crate) fn tokenize_glob(glob: &str) -> Result<Vec<EdgeKind>, Error> {
    let segments: Vec<&str> = glob.split('/').collect();
    let last = segments.len() - 1;
    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() && i != 0 && i != last {
            return Err(Error::MalformedGlob {
                glob: glob.to_owned(),
                reason: "empty glob segment",
            });
        }
    }

    let mut tokens = Vec::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            tokens.push(EdgeKind::Sep);
        }
        tokenize_segment(segment, glob, &mut tokens)?;
    }
    Ok(tokens)
}

fn tokenize_segment(segment: &str, whole_glob: &str, out: &mut Vec<EdgeKind>) -> Result<(), Error> {
    let chars: Vec<char> = segment.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '?' => {
                out.push(EdgeKind::AnyChar);
                i += 1;
            }
            '*' => {
                // Maximal run of `*`. A run that reaches the end of the
                // segment keeps its cross-segment reach as `DoubleStar` as
                // long as it's two or more characters — whether it's the
                // whole segment (`**`) or only its tail following literal
                // text (`baz**`): `baz**/foo.py` must still match
                // `baz/spam/foo.py` and `bazfolder/spam/foo.py`, which a
                // segment-bounded `StarSeg` can never cross a `/` to reach.
                // A run that stops short of the segment's end (more
                // characters follow within the same segment) has nowhere
                // to grow into and stays a bounded `StarSeg`.
                let run_start = i;
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
                let run_len = i - run_start;
                if run_len >= 2 && i == chars.len() {
                    out.push(EdgeKind::DoubleStar);
                } else {
                    out.push(EdgeKind::StarSeg);
                }
            }
            '[' => {
                i = tokenize_class(&chars, i, whole_glob, out)?;
            }
            c => {
                out.push(EdgeKind::Lit(c));
                i += 1;
            }
        }
    }
    Ok(())
}

fn tokenize_class(
    chars: &[char],
    open_bracket: usize,
    whole_glob: &str,
    out: &mut Vec<EdgeKind>,
) -> Result<usize, Error> {
    let mut i = open_bracket + 1;
    let negated = chars.get(i) == Some(&'!');
    if negated {
        i += 1;
    }
    let body_start = i;
    // A `]` immediately after `[` or `[!` is a literal member, not the
    // closing bracket.
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    while chars.get(i).is_some() && chars[i] != ']' {
        i += 1;
    }
    if chars.get(i) != Some(&']') {
        return Err(Error::MalformedGlob {
            glob: whole_glob.to_owned(),
            reason: "unterminated character class",
        });
    }
    let body: BTreeSet<char> = chars[body_start..i].iter().copied().collect();
    if body.is_empty() {
        return Err(Error::MalformedGlob {
            glob: whole_glob.to_owned(),
            reason: "empty character class",
        });
    }
    out.push(if negated {
        EdgeKind::NegClass(body)
    } else {
        EdgeKind::Class(body)
    });
    Ok(i + 1)
}

/// Turn a concrete path into the stream of `Lit`/`Sep` edges
/// `Trie::augment` walks. Paths never contain wildcards, so this is the
/// trivial half of tokenization.
pub(crate) fn tokenize_path(path: &str) -> Result<Vec<EdgeKind>, Error> {
    if path.is_empty() {
        return Err(Error::MalformedPath {
            path: path.to_owned(),
            reason: "path is empty",
        });
    }
    let mut tokens = Vec::with_capacity(path.len());
    let mut prev_was_sep = false;
    for c in path.chars() {
        if c == '/' {
            if prev_was_sep {
                return Err(Error::MalformedPath {
                    path: path.to_owned(),
                    reason: "empty path segment",
                });
            }
            tokens.push(EdgeKind::Sep);
            prev_was_sep = true;
        } else {
            tokens.push(EdgeKind::Lit(c));
            prev_was_sep = false;
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(c: char) -> EdgeKind {
        EdgeKind::Lit(c)
    }

    #[test]
    fn test_literal_glob() {
        assert_eq!(
            tokenize_glob("foo.py").unwrap(),
            vec![lit('f'), lit('o'), lit('o'), lit('.'), lit('p'), lit('y')]
        );
    }

    #[test]
    fn test_trailing_double_star_with_literal_prefix_stays_cross_segment() {
        assert_eq!(
            tokenize_glob("baz**/foo.py").unwrap(),
            vec![
                lit('b'),
                lit('a'),
                lit('z'),
                EdgeKind::DoubleStar,
                EdgeKind::Sep,
                lit('f'),
                lit('o'),
                lit('o'),
                lit('.'),
                lit('p'),
                lit('y'),
            ]
        );
    }

    #[test]
    fn test_single_star_with_trailing_literal_stays_bounded() {
        assert_eq!(
            tokenize_glob("egg*/foo.py").unwrap(),
            vec![
                lit('e'),
                lit('g'),
                lit('g'),
                EdgeKind::StarSeg,
                EdgeKind::Sep,
                lit('f'),
                lit('o'),
                lit('o'),
                lit('.'),
                lit('p'),
                lit('y'),
            ]
        );
    }

    #[test]
    fn test_star_run_followed_by_more_segment_text_stays_bounded() {
        assert_eq!(
            tokenize_glob("ba**z.py").unwrap(),
            vec![
                lit('b'),
                lit('a'),
                EdgeKind::StarSeg,
                lit('z'),
                lit('.'),
                lit('p'),
                lit('y'),
            ]
        );
    }

    #[test]
    fn test_bare_double_star_segment_keeps_trailing_sep() {
        assert_eq!(
            tokenize_glob("**/foo.py").unwrap(),
            vec![
                EdgeKind::DoubleStar,
                EdgeKind::Sep,
                lit('f'),
                lit('o'),
                lit('o'),
                lit('.'),
                lit('p'),
                lit('y'),
            ]
        );
    }

    #[test]
    fn test_double_star_not_first_segment_keeps_leading_sep() {
        assert_eq!(
            tokenize_glob("spam/**/foo.py").unwrap(),
            vec![
                lit('s'),
                lit('p'),
                lit('a'),
                lit('m'),
                EdgeKind::Sep,
                EdgeKind::DoubleStar,
                EdgeKind::Sep,
                lit('f'),
                lit('o'),
                lit('o'),
                lit('.'),
                lit('p'),
                lit('y'),
            ]
        );
    }

    #[test]
    fn test_class_and_negclass() {
        let tokens = tokenize_glob("fo[br].py").unwrap();
        assert_eq!(
            tokens,
            vec![
                lit('f'),
                lit('o'),
                EdgeKind::Class(['b', 'r'].into_iter().collect()),
                lit('.'),
                lit('p'),
                lit('y'),
            ]
        );

        let tokens = tokenize_glob("fo[!obr].py").unwrap();
        assert_eq!(
            tokens,
            vec![
                lit('f'),
                lit('o'),
                EdgeKind::NegClass(['o', 'b', 'r'].into_iter().collect()),
                lit('.'),
                lit('p'),
                lit('y'),
            ]
        );
    }

    #[test]
    fn test_literal_star_in_class() {
        let tokens = tokenize_glob("[*]foo.py").unwrap();
        assert_eq!(tokens[0], EdgeKind::Class(['*'].into_iter().collect()));
    }

    #[test]
    fn test_unterminated_class_is_malformed() {
        assert!(tokenize_glob("fo[br.py").is_err());
    }

    #[test]
    fn test_empty_class_is_malformed() {
        assert!(tokenize_glob("fo[].py").is_err());
    }

    #[test]
    fn test_double_sep_glob_is_malformed() {
        assert!(tokenize_glob("a//b").is_err());
        assert!(tokenize_glob("//").is_err());
    }

    #[test]
    fn test_leading_and_trailing_sep_glob_is_not_malformed() {
        assert!(tokenize_glob("/bar").is_ok());
        assert!(tokenize_glob("bar/").is_ok());
    }

    #[test]
    fn test_empty_path_is_malformed() {
        assert!(tokenize_path("").is_err());
    }

    #[test]
    fn test_double_sep_path_is_malformed() {
        assert!(tokenize_path("bar//foo.py").is_err());
    }

    #[test]
    fn test_path_tokenizes_to_lit_and_sep_only() {
        assert_eq!(
            tokenize_path("bar/foo.py").unwrap(),
            vec![
                lit('b'),
                lit('a'),
                lit('r'),
                EdgeKind::Sep,
                lit('f'),
                lit('o'),
                lit('o'),
                lit('.'),
                lit('p'),
                lit('y'),
            ]
        );
    }
}

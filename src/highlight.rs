//! Regex-driven approximate syntax highlighting.
//!
//! This is a rule-ordered span classifier, not a lexer: each rule scans only
//! spans that are still in the default foreground color and splits them around
//! its matches. Earlier rules win, so a keyword inside an already-matched
//! string span is never re-colored. The output is heuristic highlighting good
//! enough for share images; it makes no claim of grammatical correctness.

use regex::Regex;

/// RGBA color tuple, straight bytes
pub type Rgba = (u8, u8, u8, u8);

/// Editor color palette (VS Code dark)
pub mod palette {
    use super::Rgba;

    pub const BACKGROUND: Rgba = (0x1e, 0x1e, 0x1e, 0xff);
    pub const BACKGROUND_SECONDARY: Rgba = (0x25, 0x25, 0x26, 0xff);
    pub const FOREGROUND: Rgba = (0xd4, 0xd4, 0xd4, 0xff);
    pub const COMMENT: Rgba = (0x6a, 0x99, 0x55, 0xff);
    pub const STRING: Rgba = (0xce, 0x91, 0x78, 0xff);
    pub const NUMBER: Rgba = (0xb5, 0xce, 0xa8, 0xff);
    pub const KEYWORD: Rgba = (0x56, 0x9c, 0xd6, 0xff);
    pub const FUNCTION: Rgba = (0xdc, 0xdc, 0xaa, 0xff);
    pub const TYPE: Rgba = (0x4e, 0xc9, 0xb0, 0xff);
    pub const PROPERTY: Rgba = (0x92, 0xc5, 0xf7, 0xff);
    pub const CONSTANT: Rgba = (0x4f, 0xc1, 0xff, 0xff);
    pub const OPERATOR: Rgba = FOREGROUND;
    pub const PUNCTUATION: Rgba = FOREGROUND;
    pub const BORDER: Rgba = (0x3e, 0x3e, 0x42, 0xff);
    pub const LINE_NUMBER: Rgba = (0x85, 0x85, 0x85, 0xff);
}

/// One colored span of a source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub color: Rgba,
}

struct Rule {
    pattern: Regex,
    /// Capture group whose span gets the color; 0 colors the whole match.
    /// Used where the original patterns relied on lookahead (call position).
    group: usize,
    color: Rgba,
}

impl Rule {
    fn new(pattern: &str, color: Rgba) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            group: 0,
            color,
        }
    }

    fn with_group(pattern: &str, group: usize, color: Rgba) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            group,
            color,
        }
    }
}

/// Line tokenizer with a fixed, priority-ordered rule list
pub struct Highlighter {
    rules: Vec<Rule>,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        let rules = vec![
            Rule::new(r"//.*$", palette::COMMENT),
            Rule::new(r"/\*.*?\*/", palette::COMMENT),
            Rule::new(r#""([^"\\]|\\.)*""#, palette::STRING),
            Rule::new(r"'([^'\\]|\\.)*'", palette::STRING),
            Rule::new(r"`([^`\\]|\\.)*`", palette::STRING),
            Rule::new(r"\b\d+\.?\d*\b", palette::NUMBER),
            Rule::new(
                r"\b(const|let|var|function|return|if|else|for|while|class|import|export|from|default|async|await|try|catch|throw|new|this|super|extends|implements|interface|type|enum|namespace|module|declare|public|private|protected|static|readonly|abstract|fn|pub|impl|struct|trait|use|mod|match|loop|mut|ref|where|unsafe|dyn)\b",
                palette::KEYWORD,
            ),
            Rule::new(r"\b(true|false|null|undefined|NaN|Infinity|None|Some|Ok|Err)\b", palette::CONSTANT),
            Rule::new(r"\b[A-Z][a-zA-Z0-9]*\b", palette::TYPE),
            Rule::with_group(r"([a-zA-Z_$][a-zA-Z0-9_$]*)\s*\(", 1, palette::FUNCTION),
            Rule::new(r"\.[a-zA-Z_$][a-zA-Z0-9_$]*", palette::PROPERTY),
            Rule::new(r"[{}\[\]()]", palette::PUNCTUATION),
            Rule::new(r"[+\-*/%=<>!&|^~?:;,]", palette::OPERATOR),
        ];
        Self { rules }
    }

    /// Classify one source line into an ordered, gap-free sequence of tokens.
    ///
    /// The concatenation of the returned tokens' text always equals `line`.
    /// Total over any input; a line with no matches comes back as a single
    /// foreground token.
    pub fn tokenize(&self, line: &str) -> Vec<Token> {
        let mut tokens = vec![Token {
            text: line.to_string(),
            color: palette::FOREGROUND,
        }];

        for rule in &self.rules {
            let mut next = Vec::with_capacity(tokens.len());

            for token in tokens {
                if token.color != palette::FOREGROUND {
                    next.push(token);
                    continue;
                }

                let mut last = 0usize;
                for caps in rule.pattern.captures_iter(&token.text) {
                    let span = match caps.get(rule.group) {
                        Some(m) => m,
                        None => continue,
                    };
                    if span.start() > last {
                        next.push(Token {
                            text: token.text[last..span.start()].to_string(),
                            color: palette::FOREGROUND,
                        });
                    }
                    next.push(Token {
                        text: span.as_str().to_string(),
                        color: rule.color,
                    });
                    last = span.end();
                }
                if last < token.text.len() {
                    next.push(Token {
                        text: token.text[last..].to_string(),
                        color: palette::FOREGROUND,
                    });
                }
            }

            tokens = next;
            tokens.retain(|t| !t.text.is_empty());
        }

        tokens
    }
}

//! Title-to-slug derivation.
//!
//! A cover's identity is the slug of its article title: lowercase ASCII,
//! digits and single hyphens, at most 50 characters. The same slug is used
//! for the cover cache filename and for the published article URL, so the
//! derivation favors the tokens that carry search value and drops the rest.
//!
//! ## Derivation steps
//!
//! 1. Lowercase and fold accented Latin characters to plain ASCII.
//! 2. Discard everything from the first colon onward (subtitles).
//! 3. Tokenize on whitespace, trimming punctuation at token edges while
//!    preserving interior hyphens (`e-commerce` stays one token).
//! 4. Rewrite known multi-word variants to a canonical token
//!    (`pequenas e medias empresas` → `pmes`). The rewrite table is ordered
//!    longest phrase first and the first match at each position wins.
//! 5. Keep priority domain terms unconditionally; drop stop words, bare
//!    years (1900–2099) and month names.
//! 6. Join with hyphens. If the result exceeds 50 characters, rebuild it
//!    from priority tokens first, then remaining tokens, both in original
//!    order, stopping before the first token that no longer fits.

use std::fmt;

/// Upper bound on slug length, in bytes (the slug is pure ASCII).
const MAX_SLUG_LEN: usize = 50;

/// Articles, pronouns, prepositions, and generic filler that carry no
/// search value in a slug.
const STOP_WORDS: &[&str] = &[
    // articles
    "a", "as", "o", "os", "um", "uma", "umas", "uns",
    // prepositions and contractions
    "ao", "aos", "apos", "ate", "com", "contra", "da", "das", "de", "desde",
    "do", "dos", "durante", "em", "entre", "na", "nas", "no", "nos", "para",
    "pela", "pelas", "pelo", "pelos", "perante", "por", "sem", "sob", "sobre",
    // conjunctions
    "e", "mas", "nem", "ou", "porque", "quando", "que", "se",
    // pronouns and possessives
    "aquela", "aquelas", "aquele", "aqueles", "aquilo", "essa", "essas",
    "esse", "esses", "esta", "estas", "este", "estes", "isso", "isto", "meu",
    "meus", "minha", "minhas", "nossa", "nossas", "nosso", "nossos", "seu",
    "seus", "sua", "suas", "voce", "voces",
    // quantifiers
    "cada", "mais", "menos", "muito", "muitos", "outra", "outras", "outro",
    "outros", "toda", "todas", "todo", "todos",
    // generic marketing filler
    "ano", "anos", "artigo", "completa", "completo", "dica", "dicas",
    "empresa", "empresas", "forma", "formas", "guia", "hoje", "maneira",
    "maneiras", "melhor", "melhores", "negocio", "negocios", "passo",
    "passos", "portugal", "portugues", "portuguesa", "portuguesas",
    "portugueses",
];

/// Month names are dropped like stop words (accent-folded forms).
const MONTHS: &[&str] = &[
    "janeiro", "fevereiro", "marco", "abril", "maio", "junho", "julho",
    "agosto", "setembro", "outubro", "novembro", "dezembro",
];

/// Domain terms kept unconditionally, even when the length budget forces
/// other tokens out.
const PRIORITY_TOKENS: &[&str] = &[
    "ads", "analytics", "branding", "conteudo", "digital", "e-commerce",
    "ecommerce", "email", "facebook", "google", "ia", "instagram", "leads",
    "linkedin", "marketing", "pmes", "redes-sociais", "seo", "site",
    "tiktok", "vendas", "web", "whatsapp", "wordpress", "youtube",
];

/// Multi-word variants rewritten to a canonical token before stop-word
/// removal. Ordered longest phrase first; the scanner tries entries in table
/// order at each position, so a shorter prefix can never shadow a longer
/// phrase. `phrase_rewrites_ordered_longest_first` pins this invariant.
const PHRASE_REWRITES: &[(&[&str], &str)] = &[
    (&["pequenas", "e", "medias", "empresas"], "pmes"),
    (&["pequenas", "medias", "empresas"], "pmes"),
    (&["comercio", "eletronico"], "e-commerce"),
    (&["e", "commerce"], "e-commerce"),
    (&["inteligencia", "artificial"], "ia"),
    (&["redes", "sociais"], "redes-sociais"),
    (&["estrategica"], "estrategia"),
    (&["estrategicas"], "estrategia"),
    (&["estrategico"], "estrategia"),
    (&["estrategicos"], "estrategia"),
];

/// A normalized, length-bounded URL slug derived from an article title.
///
/// Contains only `[a-z0-9-]`, never starts or ends with a hyphen, never
/// contains a doubled hyphen, and is at most 50 bytes long. May be empty
/// when the title reduces to zero tokens — callers must handle that case
/// (the cover cache falls back to a content hash).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slug(String);

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Derive the slug for an article title.
///
/// Pure function: the same title always yields the same slug.
pub fn generate_slug(title: &str) -> Slug {
    let folded = normalize(title);
    // Subtitles ("Titulo: Guia Completo") are excluded from the slug.
    let main = folded.split(':').next().unwrap_or("");

    let tokens: Vec<String> = main.split_whitespace().filter_map(clean_token).collect();
    let tokens = rewrite_phrases(&tokens);

    let kept: Vec<String> = tokens
        .into_iter()
        .filter(|t| is_priority(t) || !is_stop_word(t))
        .collect();

    let joined = kept.join("-");
    if joined.len() <= MAX_SLUG_LEN {
        Slug(joined)
    } else {
        Slug(rebuild_within_budget(&kept))
    }
}

/// Lowercase and fold accented Latin characters to their ASCII equivalents.
pub(crate) fn normalize(text: &str) -> String {
    text.to_lowercase().chars().map(fold_char).collect()
}

/// Fold one accented Latin character to its unaccented ASCII equivalent.
/// Characters outside the mapping pass through unchanged.
pub(crate) fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        _ => c,
    }
}

/// Reduce a whitespace-delimited token to alphanumerics joined by single
/// hyphens. Edge punctuation is trimmed, interior punctuation runs collapse
/// to one hyphen, so `"e-commerce,"` → `"e-commerce"` and `"(2024)"` →
/// `"2024"`. Returns `None` when nothing alphanumeric remains.
fn clean_token(raw: &str) -> Option<String> {
    let mut out = String::new();
    let mut pending_dash = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            out.push(c);
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    if out.is_empty() { None } else { Some(out) }
}

/// Apply the phrase rewrite table over the token stream.
///
/// At each position the table is tried in order; the first matching phrase
/// is replaced by its canonical token and the scan continues after it, so
/// substitutions never overlap.
fn rewrite_phrases(tokens: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    'scan: while i < tokens.len() {
        for (phrase, replacement) in PHRASE_REWRITES {
            if phrase.len() <= tokens.len() - i
                && phrase
                    .iter()
                    .zip(&tokens[i..])
                    .all(|(p, t)| *p == t.as_str())
            {
                out.push((*replacement).to_string());
                i += phrase.len();
                continue 'scan;
            }
        }
        out.push(tokens[i].clone());
        i += 1;
    }
    out
}

fn is_priority(token: &str) -> bool {
    PRIORITY_TOKENS.contains(&token)
}

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token) || MONTHS.contains(&token) || is_bare_year(token)
}

/// A bare 4-digit year in 1900–2099.
fn is_bare_year(token: &str) -> bool {
    token.len() == 4
        && token.chars().all(|c| c.is_ascii_digit())
        && token.parse::<u32>().is_ok_and(|y| (1900..=2099).contains(&y))
}

/// Rebuild an over-long slug inside the length budget: priority tokens
/// first, then the rest, both in their original relative order. Stops at
/// the first token that would push the running length past the budget.
fn rebuild_within_budget(kept: &[String]) -> String {
    let mut result = String::new();
    for token in kept.iter().filter(|t| is_priority(t)) {
        if !append_if_fits(&mut result, token) {
            return result;
        }
    }
    for token in kept.iter().filter(|t| !is_priority(t)) {
        if !append_if_fits(&mut result, token) {
            return result;
        }
    }
    result
}

fn append_if_fits(result: &mut String, token: &str) -> bool {
    let needed = if result.is_empty() {
        token.len()
    } else {
        result.len() + 1 + token.len()
    };
    if needed > MAX_SLUG_LEN {
        return false;
    }
    if !result.is_empty() {
        result.push('-');
    }
    result.push_str(token);
    true
}

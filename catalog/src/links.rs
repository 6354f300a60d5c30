use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

// Everything JavaScript's encodeURI escapes: controls plus the ASCII
// characters outside the URI reserved/unreserved sets. Non-ASCII bytes are
// always percent-encoded by utf8_percent_encode.
const URI_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encodes a derived PDF path into a usable link target.
pub fn encode_uri(path: &str) -> String {
    utf8_percent_encode(path, URI_ESCAPE).to_string()
}

// "Single_Qestions" reproduces the on-disk directory name, typo included.

pub fn question_paper_path(base: &str, level: &str, year: &str, question: u32) -> String {
    format!("{base}/Single_Qestions/{level}/{year}/Q{question}.pdf")
}

pub fn marking_instructions_path(
    base: &str,
    level: &str,
    year: &str,
    question: u32,
    sub_id: &str,
) -> String {
    format!("{base}/Single_Qestions/{level}/{year}/MI_Q{question}/MI_Q{question}_{sub_id}.pdf")
}

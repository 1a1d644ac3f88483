pub fn whitespace_tokenizer(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

pub(crate) fn owned_tokens(text: &str) -> Vec<String> {
    whitespace_tokenizer(text)
        .into_iter()
        .map(str::to_string)
        .collect()
}

use super::GenerationInputs;

/// Replaces `{key}` placeholders with values from `inputs`.
///
/// Unknown keys and braces that do not form an identifier placeholder (for
/// example JSON examples embedded in a prompt) are left untouched.
pub fn render(template: &str, inputs: &GenerationInputs) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            let is_ident = !key.is_empty()
                && key
                    .chars()
                    .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
            if is_ident {
                inputs.get(key).map(|value| (value, close))
            } else {
                None
            }
        });

        match replacement {
            Some((value, close)) => {
                rendered.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                rendered.push('{');
                rest = after;
            }
        }
    }

    rendered.push_str(rest);
    rendered
}

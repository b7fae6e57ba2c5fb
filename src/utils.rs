// ###################################
// ->   Error format chain
// ###################################
/// Calls `Error::source()` on a chain of errors and joins them into a single line.
///
/// `error sending request: client error (Connect): tcp connect error: Connection refused`
pub fn error_chain(e: &dyn std::error::Error) -> String {
    let mut out = e.to_string();
    let mut current_src = e.source();
    while let Some(cause) = current_src {
        let cause_msg = cause.to_string();
        // Some errors already print their source as part of their own message.
        if !out.ends_with(&cause_msg) {
            out.push_str(": ");
            out.push_str(&cause_msg);
        }
        current_src = cause.source();
    }

    out
}

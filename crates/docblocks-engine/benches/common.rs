// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn block_id(n: usize) -> String {
    format!("a1b2c3d4-e5f6-4a7b-8c9d-{n:012x}")
}

/// An assignment body with `sections` rounds of prose, page blocks, fenced
/// quizzes, fill-in-blank quizzes and feedback.
#[allow(dead_code)]
pub fn generate_assignment(sections: usize) -> String {
    let mut content = String::new();

    for i in 0..sections {
        content.push_str(&format!(
            "# Section {i}\n\nSome paragraph content with a few sentences.\n\n"
        ));
        content.push_str(&format!("((({}\nReading for section {i}\n(((\n\n", block_id(i * 3)));
        content.push_str(&format!(
            "&&&{}\nWhat did section {i} cover?\n- one\n- two\n&&&\n\n",
            block_id(i * 3 + 1)
        ));
        content.push_str(&format!("Fill in: {{bl%{}%lb}}\n\n", block_id(i * 3 + 2)));
        content.push_str(&format!("{{rr%{};#;Nice work on {i}%rr}}\n\n", block_id(i * 3)));
        content.push_str("- list item\n- another item\n\n");
    }

    content
}

// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_checklist_document(sections: usize) -> String {
    let mut content = String::new();

    for section in 0..sections {
        content.push_str(&format!("## Section {section}\n\n"));
        if section % 4 == 0 {
            content.push_str("<!-- TODO-MOVER: hide -->\n");
        }
        for item in 0..12 {
            let mark = if item % 3 == 0 { 'x' } else { ' ' };
            content.push_str(&format!("- [{mark}] Task {item} in section {section}\n"));
        }
        content.push_str("\nSome paragraph text between lists.\n\n");
    }

    content
}

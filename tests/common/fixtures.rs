use std::path::Path;

use worship_deck::{Catalogs, WorshipProgram};

pub const PROGRAM_FIXTURE: &str = "tests/fixtures/program.json";
pub const HYMNS_FIXTURE: &str = "tests/fixtures/hymns.json";
pub const SCRIPTURES_FIXTURE: &str = "tests/fixtures/scriptures.json";
pub const TEMPLATES_FIXTURE: &str = "tests/fixtures/templates.json";

fn read_fixture(path: &str) -> String {
    let full = Path::new(env!("CARGO_MANIFEST_DIR")).join(path);
    std::fs::read_to_string(&full)
        .unwrap_or_else(|e| panic!("read fixture {}: {}", full.display(), e))
}

pub fn load_program() -> WorshipProgram {
    WorshipProgram::from_json(&read_fixture(PROGRAM_FIXTURE)).expect("decode program fixture")
}

pub fn load_catalogs() -> Catalogs {
    Catalogs::from_json_parts(
        &read_fixture(HYMNS_FIXTURE),
        &read_fixture(SCRIPTURES_FIXTURE),
        &read_fixture(TEMPLATES_FIXTURE),
    )
    .expect("decode catalog fixtures")
}

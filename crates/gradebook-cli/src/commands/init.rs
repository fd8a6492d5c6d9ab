//! The `gradebook init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("gradebook.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("students.txt"), SAMPLE_DATA)?;

    println!("\nNext steps:");
    println!("  1. Edit gradebook.toml to point at your data file");
    println!("  2. Run: gradebook report all");
    println!("  3. Run: gradebook menu");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradebook configuration

data_file = "students.txt"
school_name = "Braemar College"
# table | classic | json
format = "table"
"#;

const SAMPLE_DATA: &str = "\
Student_id,student_first_name,student_last_name,course_code,mark
1001,Jane,Doe,MCR3U,85
1001,Jane,Doe,ICS3U,91
1002,John,Smith,MCR3U,72
1002,John,Smith,ENG4U,45
1003,Maria,Garcia,ICS3U,91
1003,Maria,Garcia,ENG4U,68
";

use crate::error::{AppError, AppResult};
use crate::records::StudentDraft;

pub const EXPECTED_FORMAT: &str = "StudentId,Name,FatherName,MotherName";

/// Parses a roster upload. The first line is a header and is skipped; rows missing
/// any of the four fields are dropped. Zero usable rows is an error.
pub fn parse_student_csv(text: &str) -> AppResult<Vec<StudentDraft>> {
    let drafts: Vec<StudentDraft> = text.lines().skip(1).filter_map(parse_row).collect();
    if drafts.is_empty() {
        return Err(AppError::ImportParse(format!(
            "could not parse CSV or file is empty. Expected format: {}",
            EXPECTED_FORMAT
        )));
    }
    Ok(drafts)
}

fn parse_row(line: &str) -> Option<StudentDraft> {
    let mut fields = line.split(',').map(str::trim);
    let student_id = fields.next().filter(|s| !s.is_empty())?;
    let name = fields.next().filter(|s| !s.is_empty())?;
    let father_name = fields.next().filter(|s| !s.is_empty())?;
    let mother_name = fields.next().filter(|s| !s.is_empty())?;
    Some(StudentDraft {
        student_id: student_id.to_string(),
        name: name.to_string(),
        father_name: father_name.to_string(),
        mother_name: mother_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_rows_after_header() {
        let drafts = parse_student_csv("id,name,father,mother\nS1,A,B,C\nS2,D,E,F").expect("parse");
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[1].student_id, "S2");
        assert_eq!(drafts[1].mother_name, "F");
    }

    #[test]
    fn header_only_is_an_error() {
        let r = parse_student_csv("StudentId,Name,FatherName,MotherName\n");
        assert!(matches!(r, Err(AppError::ImportParse(_))));
        assert!(parse_student_csv("").is_err());
    }

    #[test]
    fn incomplete_rows_are_dropped_and_fields_trimmed() {
        let text = "h\r\n S1 , Asha ,Vikram, Meena \r\nS2,Ravi,,Lata\r\nS3,Only\r\n\r\n";
        let drafts = parse_student_csv(text).expect("parse");
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].student_id, "S1");
        assert_eq!(drafts[0].name, "Asha");
        assert_eq!(drafts[0].mother_name, "Meena");
    }
}

use crate::attendance::{
    self, build_sheet, cycle_status, day_kind, derive_status, EditField, FixedTimes, HolidaySet,
    MonthSummary, RandomTimes, Sheet, TimeFiller,
};
use crate::calendar::{parse_date, MonthKey};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::import::parse_student_csv;
use crate::model::{ClassInfo, DailyAttendance, Holiday, Institute, Overrides, Student, ViewType};
use crate::records::{self, StudentDraft, ToggleOutcome};
use crate::store::RecordStore;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// In-memory copy of the five collections plus the unsaved attendance working copy.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub institute: Institute,
    pub classes: Vec<ClassInfo>,
    pub students: Vec<Student>,
    pub holidays: Vec<Holiday>,
    /// Last saved override log.
    pub attendance: Overrides,
    /// Edits accumulate here until `save_attendance`.
    pub live: Overrides,
    pub sheet: Option<Sheet>,
}

impl Workbook {
    pub fn holiday_set(&self) -> HolidaySet {
        HolidaySet::from_holidays(&self.holidays)
    }

    pub fn has_unsaved_attendance(&self) -> bool {
        self.live != self.attendance
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub view: ViewType,
    pub selected_class: Option<String>,
    pub authenticated: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            view: ViewType::Dashboard,
            selected_class: None,
            authenticated: false,
        }
    }
}

/// Everything the request loop owns. Handlers only change it through the methods
/// below.
pub struct AppState {
    pub config: Config,
    pub workspace: Option<PathBuf>,
    pub store: Option<RecordStore>,
    pub session: Session,
    pub book: Workbook,
    pub filler: Box<dyn TimeFiller>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let filler: Box<dyn TimeFiller> = if config.fixed_times {
            Box::new(FixedTimes)
        } else {
            Box::new(RandomTimes::from_os_rng())
        };
        Self {
            config,
            workspace: None,
            store: None,
            session: Session::default(),
            book: Workbook::default(),
            filler,
        }
    }

    pub fn store(&self) -> AppResult<&RecordStore> {
        self.store.as_ref().ok_or(AppError::NoWorkspace)
    }

    pub fn require_auth(&self) -> AppResult<()> {
        self.store()?;
        if !self.session.authenticated {
            return Err(AppError::Authentication("log in first".to_string()));
        }
        Ok(())
    }

    /// Opens the workspace store and reads every collection.
    pub fn load(&mut self, path: &Path) -> AppResult<()> {
        let store = RecordStore::open(
            path,
            self.config.store_latency,
            self.config.attendance_latency,
        )
        .map_err(|e| {
            AppError::Store(crate::error::StoreError::Read {
                key: path.to_string_lossy().to_string(),
                source: e,
            })
        })?;

        let attendance = store.get_attendance()?;
        let book = Workbook {
            institute: store.get_institute()?,
            classes: store.get_classes()?,
            students: store.get_students()?,
            holidays: store.get_holidays()?,
            live: attendance.clone(),
            attendance,
            sheet: None,
        };
        let authenticated = store.is_authenticated()?;

        info!(
            workspace = %path.display(),
            classes = book.classes.len(),
            students = book.students.len(),
            holidays = book.holidays.len(),
            overrides = book.attendance.cell_count(),
            "workspace loaded"
        );
        self.workspace = Some(path.to_path_buf());
        self.store = Some(store);
        self.book = book;
        self.session = Session {
            authenticated,
            ..Session::default()
        };
        Ok(())
    }

    pub fn login(&mut self, username: &str, password: &str) -> AppResult<()> {
        let store = self.store()?;
        if username != self.config.admin_user || password != self.config.admin_password {
            warn!("rejected login attempt");
            return Err(AppError::Authentication(
                "invalid username or password".to_string(),
            ));
        }
        store.set_authenticated(true)?;
        self.session.authenticated = true;
        Ok(())
    }

    pub fn logout(&mut self) -> AppResult<()> {
        self.store()?.set_authenticated(false)?;
        self.session = Session::default();
        Ok(())
    }

    pub fn select_view(&mut self, view: ViewType) -> AppResult<()> {
        if view == ViewType::Students && self.session.selected_class.is_none() {
            return Err(AppError::validation("please select a class first"));
        }
        // Leaving the roster drops the class pick.
        if view != ViewType::Students {
            self.session.selected_class = None;
        }
        self.session.view = view;
        Ok(())
    }

    pub fn select_class(&mut self, class_id: &str) -> AppResult<()> {
        if !self.book.classes.iter().any(|c| c.id == class_id) {
            return Err(AppError::not_found("class not found"));
        }
        self.session.selected_class = Some(class_id.to_string());
        self.session.view = ViewType::Students;
        Ok(())
    }

    pub fn update_institute(&mut self, name: &str, address: &str) -> AppResult<Institute> {
        let info = records::institute(name, address)?;
        self.store()?.save_institute(&info)?;
        self.book.institute = info.clone();
        Ok(info)
    }

    fn commit_classes(&mut self, classes: Vec<ClassInfo>) -> AppResult<()> {
        self.store()?.save_classes(&classes)?;
        self.book.classes = classes;
        Ok(())
    }

    fn commit_students(&mut self, students: Vec<Student>) -> AppResult<()> {
        self.store()?.save_students(&students)?;
        self.book.students = students;
        Ok(())
    }

    fn commit_holidays(&mut self, holidays: Vec<Holiday>) -> AppResult<()> {
        self.store()?.save_holidays(&holidays)?;
        self.book.holidays = holidays;
        Ok(())
    }

    pub fn create_class(&mut self, name: &str) -> AppResult<ClassInfo> {
        let (next, class) = records::add_class(&self.book.classes, name)?;
        self.commit_classes(next)?;
        Ok(class)
    }

    pub fn rename_class(&mut self, class_id: &str, name: &str) -> AppResult<()> {
        let next = records::rename_class(&self.book.classes, class_id, name)?;
        self.commit_classes(next)
    }

    /// Two independent writes, students first. If the second one fails the students
    /// are already gone while the class remains; re-running the delete finishes it.
    pub fn delete_class(&mut self, class_id: &str) -> AppResult<usize> {
        let removal = records::remove_class(&self.book.classes, &self.book.students, class_id)?;
        if removal.removed_students > 0 {
            self.commit_students(removal.students)?;
        }
        self.commit_classes(removal.classes)?;
        if self.session.selected_class.as_deref() == Some(class_id) {
            self.session.selected_class = None;
        }
        if self.book.sheet.as_ref().map(|s| s.class_id.as_str()) == Some(class_id) {
            self.book.sheet = None;
        }
        info!(class_id, students = removal.removed_students, "class deleted");
        Ok(removal.removed_students)
    }

    pub fn create_student(&mut self, class_id: &str, draft: StudentDraft) -> AppResult<Student> {
        let (next, student) =
            records::add_student(&self.book.classes, &self.book.students, class_id, draft)?;
        self.commit_students(next)?;
        Ok(student)
    }

    pub fn update_student(&mut self, id: &str, draft: StudentDraft) -> AppResult<Student> {
        let (next, student) = records::update_student(&self.book.students, id, draft)?;
        self.commit_students(next)?;
        Ok(student)
    }

    pub fn delete_student(&mut self, id: &str) -> AppResult<()> {
        let next = records::remove_student(&self.book.students, id)?;
        self.commit_students(next)
    }

    /// All-or-nothing: nothing is saved unless at least one row parsed.
    pub fn import_students(&mut self, class_id: &str, text: &str) -> AppResult<Vec<Student>> {
        if !self.book.classes.iter().any(|c| c.id == class_id) {
            return Err(AppError::not_found("class not found"));
        }
        let drafts = parse_student_csv(text)?;
        let mut next = self.book.students.clone();
        let mut added = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let (grown, student) = records::add_student(&self.book.classes, &next, class_id, draft)?;
            next = grown;
            added.push(student);
        }
        self.commit_students(next)?;
        info!(class_id, count = added.len(), "students imported");
        Ok(added)
    }

    pub fn create_holiday(&mut self, date: &str, name: &str) -> AppResult<Holiday> {
        let (next, holiday) = records::add_holiday(&self.book.holidays, date, name)?;
        self.commit_holidays(next)?;
        Ok(holiday)
    }

    pub fn update_holiday(&mut self, id: &str, date: &str, name: &str) -> AppResult<()> {
        let next = records::update_holiday(&self.book.holidays, id, date, name)?;
        self.commit_holidays(next)
    }

    pub fn delete_holiday(&mut self, id: &str) -> AppResult<()> {
        let next = records::remove_holiday(&self.book.holidays, id)?;
        self.commit_holidays(next)
    }

    /// Commits straight away, unlike attendance cell edits.
    pub fn toggle_holiday(&mut self, date: &str, name: Option<&str>) -> AppResult<ToggleOutcome> {
        let (next, outcome) = records::toggle_holiday(&self.book.holidays, date, name)?;
        if let Some(next) = next {
            self.commit_holidays(next)?;
        }
        Ok(outcome)
    }

    pub fn generate_sheet(&mut self, class_id: &str, start: &str, end: &str) -> AppResult<&Sheet> {
        let sheet = build_sheet(&self.book.classes, &self.book.students, class_id, start, end)?;
        self.session.view = ViewType::Attendance;
        Ok(self.book.sheet.insert(sheet))
    }

    pub fn month_view(&mut self, index: usize) -> AppResult<attendance::MonthView> {
        let sheet = self
            .book
            .sheet
            .as_ref()
            .ok_or_else(|| AppError::validation("generate a sheet first"))?;
        attendance::render_month(
            sheet,
            index,
            &self.book.live,
            &self.book.holidays,
            self.filler.as_mut(),
        )
    }

    fn check_cell_target(&self, student_id: &str, date: &str) -> AppResult<()> {
        if parse_date(date).is_none() {
            return Err(AppError::validation("date must be YYYY-MM-DD"));
        }
        if !self.book.students.iter().any(|s| s.id == student_id) {
            return Err(AppError::not_found("student not found"));
        }
        Ok(())
    }

    pub fn cell(&mut self, student_id: &str, date: &str) -> AppResult<DailyAttendance> {
        self.check_cell_target(student_id, date)?;
        let set = self.book.holiday_set();
        Ok(attendance::derive(
            &self.book.live,
            &set,
            student_id,
            date,
            self.filler.as_mut(),
        ))
    }

    /// Sunday and holiday columns are not editable on the sheet, so no override is
    /// ever recorded for them.
    pub fn apply_edit(
        &mut self,
        student_id: &str,
        date: &str,
        field: EditField,
        value: &str,
    ) -> AppResult<DailyAttendance> {
        self.check_cell_target(student_id, date)?;
        let set = self.book.holiday_set();
        if !day_kind(&set, date).is_working() {
            return Err(AppError::validation(format!(
                "{} is not a working day",
                date
            )));
        }
        let next = attendance::apply_edit(
            &self.book.live,
            &set,
            student_id,
            date,
            field,
            value,
            self.filler.as_mut(),
        )?;
        let cell = next.get(student_id, date).cloned().unwrap_or_default();
        self.book.live = next;
        Ok(cell)
    }

    pub fn cycle(&mut self, student_id: &str, date: &str) -> AppResult<DailyAttendance> {
        self.check_cell_target(student_id, date)?;
        let set = self.book.holiday_set();
        let next = cycle_status(derive_status(&self.book.live, &set, student_id, date));
        self.apply_edit(student_id, date, EditField::Status, next.code())
    }

    pub fn summary(&self, student_id: &str, month: &str) -> AppResult<MonthSummary> {
        if !self.book.students.iter().any(|s| s.id == student_id) {
            return Err(AppError::not_found("student not found"));
        }
        let key = MonthKey::parse(month).map_err(AppError::Validation)?;
        Ok(attendance::month_summary(
            &self.book.live,
            &self.book.holiday_set(),
            student_id,
            key,
        ))
    }

    /// Persists the whole working copy.
    pub fn save_attendance(&mut self) -> AppResult<usize> {
        self.store()?.save_attendance(&self.book.live)?;
        self.book.attendance = self.book.live.clone();
        let cells = self.book.attendance.cell_count();
        info!(cells, "attendance saved");
        Ok(cells)
    }

    /// Drops unsaved edits by re-reading what the store holds.
    pub fn discard_attendance(&mut self) -> AppResult<()> {
        let saved = self.store()?.get_attendance()?;
        self.book.attendance = saved.clone();
        self.book.live = saved;
        Ok(())
    }
}

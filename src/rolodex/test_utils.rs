use crate::backup::BackupManager;
use crate::manager::ContactManager;
use crate::model::NewContact;
use crate::store::fs::FileStorage;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // Keeps the directory alive for the duration of the test
    pub _temp_dir: TempDir,
    pub root: PathBuf,
    pub data_file: PathBuf,
    pub backup_dir: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            data_file: root.join("contacts.dat"),
            backup_dir: root.join("backups"),
            root,
            _temp_dir: temp_dir,
        }
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data_file)
    }

    /// A manager over the env's contact file, loaded from disk.
    pub fn open(&self) -> ContactManager<FileStorage> {
        ContactManager::open(self.storage()).expect("failed to open contact file")
    }

    /// Like [`open`](Self::open), with backups going to the env's backup dir.
    pub fn open_with_backups(&self, backups: BackupManager) -> ContactManager<FileStorage> {
        let mut manager = ContactManager::new(self.storage()).with_backups(backups);
        manager.load().expect("failed to load contact file");
        manager
    }
}

/// A few contacts exercising tags, companies, email and birthdays.
pub fn sample_contacts() -> Vec<NewContact> {
    vec![
        NewContact::new("Ann Lee", "555-0100")
            .with_email("ann@initech.com")
            .with_company("Initech")
            .with_birthday("1990-06-15")
            .with_tag("work")
            .with_tag("vip"),
        NewContact::new("Bo Diaz", "555-0199")
            .with_email("bo@globex.com")
            .with_company("Globex")
            .with_tag("work"),
        NewContact::new("Cy O'Neil", "+1 (555) 010-0300").with_tag("family"),
    ]
}

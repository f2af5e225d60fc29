use rolodex::config::RolodexConfig;
use rolodex::init::initialize;
use rolodex::manager::{ContactManager, SortKey};
use rolodex::model::{ContactId, ContactUpdate, Field, NewContact};
use rolodex::obfuscate::XorObfuscator;
use rolodex::store::fs::FileStorage;

#[test]
fn test_sorted_order_is_persisted() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("contacts.dat");

    let mut manager = ContactManager::open(FileStorage::new(&path)).unwrap();
    manager.add_contact(NewContact::new("Cy", "555-0300")).unwrap();
    manager.add_contact(NewContact::new("Ann", "555-0200")).unwrap();
    manager.add_contact(NewContact::new("Bo", "555-0100")).unwrap();
    manager.sort_by(SortKey::Name);
    manager.close().unwrap();

    let reopened = ContactManager::open(FileStorage::new(&path)).unwrap();
    let names: Vec<_> = reopened.contacts().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["Ann", "Bo", "Cy"]);
    assert_eq!(reopened.get_contact(ContactId(1)).unwrap().name(), "Cy");
}

#[test]
fn test_payload_is_the_xor_of_the_text_format() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("contacts.dat");

    let mut manager = ContactManager::open(FileStorage::new(&path)).unwrap();
    manager
        .add_contact(NewContact::new("Ann Lee", "555-0100").with_tag("vip"))
        .unwrap();
    manager.save().unwrap();

    let raw = std::fs::read(&path).unwrap();
    let plain = String::from_utf8(XorObfuscator::default().decrypt(&raw)).unwrap();
    let lines: Vec<&str> = plain.lines().collect();
    assert_eq!(lines.len(), 16);
    assert_eq!(lines[0], "1");
    assert_eq!(lines[1], "Ann Lee");
    assert_eq!(lines[2], "555-0100");
    assert_eq!(lines[11], "0");
    assert_eq!(lines[14], "1");
    assert_eq!(lines[15], "vip");
}

#[test]
fn test_edits_survive_restart_through_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = RolodexConfig::default();
    config.obfuscation_key = "another secret".to_string();
    config.save(temp_dir.path()).unwrap();

    let mut api = initialize(temp_dir.path(), &config).unwrap();
    api.add_contact(NewContact::new("Ann Lee", "555-0100")).unwrap();
    let update = ContactUpdate::default().with(Field::Company, "Initech");
    api.edit_contact("555-0100", &update).unwrap();
    api.close().unwrap();

    let loaded = RolodexConfig::load(temp_dir.path()).unwrap();
    let api = initialize(temp_dir.path(), &loaded).unwrap();
    let ann = api.manager().find_by_phone("555-0100").unwrap();
    assert_eq!(ann.company(), "Initech");
    assert!(ann.modified_at() >= ann.created_at());
}

use super::discover_components;
use crate::project::{Project, PROJECT_FILE};
use std::path::Path;
use tempfile::TempDir;

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent directory");
    }
    std::fs::write(path, contents.as_bytes()).expect("write file");
}

fn sample_project() -> (TempDir, Project) {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();
    write_file(
        &root.join(PROJECT_FILE),
        r#"{"packageDirectories":[{"path":"force-app","default":true}]}"#,
    );
    let default = root.join("force-app/main/default");
    write_file(&default.join("lwc/myCard/myCard.js"), "export default class MyCard {}");
    write_file(&default.join("lwc/myCard/myCard.html"), "<template></template>");
    write_file(&default.join("lwc/myCard/myCard.js-meta.xml"), "<LightningComponentBundle/>");
    write_file(&default.join("lwc/myCard/__tests__/myCard.test.js"), "test()");
    write_file(&default.join("lwc/noMeta/noMeta.js"), "export default class NoMeta {}");
    write_file(&default.join("classes/MyClass.cls"), "public class MyClass {}");
    write_file(&default.join("classes/MyClass.cls-meta.xml"), "<ApexClass/>");
    let project = Project::resolve(Some(root)).expect("resolve project");
    (dir, project)
}

fn names(components: &[crate::component::Component]) -> Vec<String> {
    components
        .iter()
        .map(|component| {
            format!(
                "{}:{}",
                component.type_name().unwrap_or_default(),
                component.addressable_name().unwrap_or_default()
            )
        })
        .collect()
}

#[test]
fn wildcard_discovers_every_bundle_of_a_type() {
    let (_dir, project) = sample_project();
    let found = discover_components(&project, &["LightningComponentBundle:*".to_string()])
        .expect("discover components");
    assert_eq!(
        names(&found),
        vec![
            "LightningComponentBundle:myCard".to_string(),
            "LightningComponentBundle:noMeta".to_string(),
        ]
    );
    assert!(found[0].xml.is_some());
    assert!(found[1].xml.is_none());
}

#[test]
fn bundle_content_skips_test_directories() {
    let (_dir, project) = sample_project();
    let found = discover_components(&project, &["LightningComponentBundle:myCard".to_string()])
        .expect("discover components");
    let files: Vec<&str> = found[0].content.iter().map(|file| file.name.as_str()).collect();
    assert_eq!(files, vec!["myCard.html", "myCard.js", "myCard.js-meta.xml"]);
}

#[test]
fn named_entries_select_single_components_across_types() {
    let (_dir, project) = sample_project();
    let found = discover_components(
        &project,
        &["ApexClass:MyClass".to_string(), "LightningComponentBundle:Missing".to_string()],
    )
    .expect("discover components");
    assert_eq!(names(&found), vec!["ApexClass:MyClass".to_string()]);
    assert!(found[0].xml.is_some());
}

#[test]
fn missing_package_directory_yields_nothing() {
    let dir = TempDir::new().expect("temp dir");
    write_file(
        &dir.path().join(PROJECT_FILE),
        r#"{"packageDirectories":[{"path":"absent"}]}"#,
    );
    let project = Project::resolve(Some(dir.path())).expect("resolve project");
    let found = discover_components(&project, &["ApexClass:*".to_string()]).expect("discover");
    assert!(found.is_empty());
}

#[test]
fn object_folders_and_descriptor_only_types_are_discovered() {
    let (dir, project) = sample_project();
    let default = dir.path().join("force-app/main/default");
    write_file(&default.join("objects/Account/Account.object-meta.xml"), "<CustomObject/>");
    write_file(
        &default.join("objects/Account/fields/Tier__c.field-meta.xml"),
        "<CustomField/>",
    );
    write_file(&default.join("layouts/Account-Account Layout.layout-meta.xml"), "<Layout/>");

    let found = discover_components(
        &project,
        &["customobject:Account".to_string(), "Layout:*".to_string()],
    )
    .expect("discover components");
    assert_eq!(
        names(&found),
        vec![
            "CustomObject:Account".to_string(),
            "Layout:Account-Account Layout".to_string(),
        ]
    );
    assert!(found[0].xml.is_some());
    let files: Vec<&str> = found[0].content.iter().map(|file| file.name.as_str()).collect();
    assert_eq!(files, vec!["Account.object-meta.xml", "fields/Tier__c.field-meta.xml"]);
}

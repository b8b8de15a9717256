use crudkit::record::Record;

#[derive(crudkit::Record)]
struct Location {
    floor: i32,
    zone: Option<String>,
}

#[derive(crudkit::Record)]
struct Desk {
    #[record(skip)]
    id: i32,
    #[record(rename = "desk_label")]
    label: String,
    #[record(nested)]
    location: Location,
}

fn main() {
    let desk = Desk {
        id: 1,
        label: "A1".to_string(),
        location: Location {
            floor: 2,
            zone: None,
        },
    };
    let _ = desk.id;
    let fields = desk.fields();
    assert_eq!(fields[0].name, "desk_label");
    assert!(fields[1].is_nested());
}

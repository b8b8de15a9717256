use crudkit::record::Record;

#[derive(crudkit::Record)]
struct Desk {
    label: String,
    floor: i32,
    available: bool,
}

fn main() {
    let desk = Desk {
        label: "A1".to_string(),
        floor: 2,
        available: true,
    };
    assert_eq!(desk.fields().len(), 3);
}

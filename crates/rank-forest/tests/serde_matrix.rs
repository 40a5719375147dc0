use rank_forest::{AvlSet, FindList, PositionalList};

#[test]
fn list_serializes_in_list_order() {
    let mut list = FindList::new();
    list.push(2);
    list.insert(0, 7).unwrap();
    list.push(4);

    let json = serde_json::to_string(&list).unwrap();
    assert_eq!(json, "[7,2,4]");

    let back: FindList<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, list);
    assert_eq!(back.index_of(&4), Some(2));
    back.assert_valid().unwrap();
}

#[test]
fn positional_list_from_json() {
    let list: PositionalList<String> = serde_json::from_str(r#"["x","y","x"]"#).unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.get(2).map(String::as_str), Some("x"));
    list.assert_valid().unwrap();

    assert!(serde_json::from_str::<PositionalList<u8>>("{}").is_err());
}

#[test]
fn set_serializes_sorted() {
    let set: AvlSet<i32> = serde_json::from_str("[5,1,3,1]").unwrap();
    assert_eq!(set.len(), 3);
    assert_eq!(serde_json::to_string(&set).unwrap(), "[1,3,5]");
    set.assert_valid().unwrap();
}

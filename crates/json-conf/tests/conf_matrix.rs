use json_conf::{clone, merge, merge_into, Conf, ConfError};
use serde_json::{json, Value};

fn types_root() -> Value {
    json!({
        "obj": {"parent": {"child": {"val": "foo"}}},
        "types": {"arr": ["foo", "bar", "baz"], "str": "Foo, bar, baz.", "int": 10}
    })
}

fn scramble(conf: &mut Conf) {
    conf.set("obj.parent.child.val", json!("")).unwrap();
    conf.set("types.arr", json!([])).unwrap();
    conf.set("types.str", json!("")).unwrap();
    conf.set("types.int", json!(0)).unwrap();
}

fn get(conf: &mut Conf, loc: &str) -> Option<Value> {
    conf.get(loc).unwrap().cloned()
}

#[test]
fn clone_of_root_survives_later_writes() {
    let mut conf = Conf::from_root(types_root());
    let copy = clone(conf.root());
    conf.set("clone", copy).unwrap();
    scramble(&mut conf);
    assert_eq!(get(&mut conf, "clone.obj.parent.child.val"), Some(json!("foo")));
    assert_eq!(get(&mut conf, "clone.types.arr"), Some(json!(["foo", "bar", "baz"])));
    assert_eq!(get(&mut conf, "clone.types.str"), Some(json!("Foo, bar, baz.")));
    assert_eq!(get(&mut conf, "clone.types.int"), Some(json!(10)));
}

#[test]
fn merge_into_empty_survives_later_writes() {
    let mut conf = Conf::from_root(types_root());
    let merged = merge(&json!({}), conf.root());
    conf.set("merge", merged).unwrap();
    scramble(&mut conf);
    assert_eq!(get(&mut conf, "merge.obj.parent.child.val"), Some(json!("foo")));
    assert_eq!(get(&mut conf, "merge.types.arr"), Some(json!(["foo", "bar", "baz"])));
}

#[test]
fn merge_with_different_keys_keeps_both() {
    let mut conf = Conf::from_root(types_root());
    let populated = json!({
        "obj": {"parent": {"child": {"valNew": "foo"}}},
        "types": {"arrNew": ["foo"], "intNew": 10}
    });
    let merged = merge(conf.root(), &populated);
    conf.set("merge", merged).unwrap();
    assert_eq!(get(&mut conf, "merge.obj.parent.child.val"), Some(json!("foo")));
    assert_eq!(get(&mut conf, "merge.obj.parent.child.valNew"), Some(json!("foo")));
    assert_eq!(get(&mut conf, "merge.types.int"), Some(json!(10)));
    assert_eq!(get(&mut conf, "merge.types.arrNew"), Some(json!(["foo"])));
}

#[test]
fn merge_in_place_changes_destination() {
    let mut to = types_root();
    let untouched = to.clone();
    let copied = merge(&to, &json!({"types": {"int": 11}}));
    assert_eq!(to, untouched);

    merge_into(&mut to, &json!({"types": {"int": 11}}));
    assert_eq!(to, copied);
    assert_eq!(to["types"]["int"], json!(11));
}

#[test]
fn set_and_get_matrix() {
    let mut conf = Conf::new();
    conf.set("top", json!("value")).unwrap();
    conf.set("topper", json!("foo")).unwrap();
    conf.set("base.path.key3", json!("value")).unwrap();
    conf.set("base.path.key4", json!({"value": "foo"})).unwrap();
    conf.set(["base", "path", "key5", "deep"], json!(true)).unwrap();

    assert_eq!(get(&mut conf, "top"), Some(json!("value")));
    assert_eq!(get(&mut conf, "topper"), Some(json!("foo")));
    assert_eq!(get(&mut conf, "base.path.key3"), Some(json!("value")));
    assert_eq!(conf.get(["base", "path.key4", "value"]).unwrap(), Some(&json!("foo")));
    assert_eq!(get(&mut conf, "base.path.key5"), Some(json!({"deep": true})));
}

#[test]
fn set_nested_then_read_parent() {
    let mut conf = Conf::new();
    conf.set("a.b.c", json!(5)).unwrap();
    assert_eq!(get(&mut conf, "a.b.c"), Some(json!(5)));
    assert_eq!(get(&mut conf, "a.b"), Some(json!({"c": 5})));
}

#[test]
fn set_mapping_over_mapping_merges() {
    let mut conf = Conf::new();
    conf.set(["base", "path", "obj"], json!({"key1": "foo"})).unwrap();
    conf.set(["base", "path", "obj"], json!({"key2": "bar"})).unwrap();
    assert_eq!(get(&mut conf, "base.path.obj"), Some(json!({"key1": "foo", "key2": "bar"})));
}

#[test]
fn set_other_combinations_overwrite() {
    let mut conf = Conf::new();
    conf.set("x", json!({"a": 1})).unwrap();
    conf.set("x", json!([1])).unwrap();
    assert_eq!(get(&mut conf, "x"), Some(json!([1])));
    conf.set("x", json!({"a": 1})).unwrap();
    assert_eq!(get(&mut conf, "x"), Some(json!({"a": 1})));
    conf.set("x", json!("s")).unwrap();
    assert_eq!(get(&mut conf, "x"), Some(json!("s")));
}

#[test]
fn set_root_merges() {
    let mut conf = Conf::new();
    conf.set(".", json!({"a": 1})).unwrap();
    conf.set(".", json!({"b": 2})).unwrap();
    assert_eq!(get(&mut conf, "a"), Some(json!(1)));
    assert_eq!(get(&mut conf, "b"), Some(json!(2)));
    conf.set(Vec::<String>::new(), json!({"c": 3})).unwrap();
    assert_eq!(conf.root(), &json!({"a": 1, "b": 2, "c": 3}));
}

#[test]
fn set_root_with_scalar_keeps_tree() {
    let tree = json!({"a": {"b": 1}, "keep": true});
    let mut conf = Conf::from_root(tree.clone());
    conf.set(".", json!(5)).unwrap();
    assert_eq!(conf.root(), &tree);
    conf.set_value(".", json!("s"));
    assert_eq!(conf.root(), &tree);
}

#[test]
fn set_root_scalar_under_mapping_key_keeps_mapping() {
    let mut conf = Conf::from_root(json!({"a": {"b": 1}, "keep": true}));
    conf.set(".", json!({"a": 5, "c": [1]})).unwrap();
    assert_eq!(conf.root(), &json!({"a": {"b": 1}, "keep": true, "c": [1]}));
    conf.set(".", json!({"a": [2]})).unwrap();
    assert_eq!(get(&mut conf, "a"), Some(json!([2])));
}

#[test]
fn set_root_replacement() {
    let mut conf = Conf::from_root(json!({"old": true}));
    let previous = conf.set_root(json!({"new": true}));
    assert_eq!(previous, json!({"old": true}));
    assert_eq!(get(&mut conf, "old"), None);
    assert_eq!(get(&mut conf, "."), Some(json!({"new": true})));
}

#[test]
fn remove_matrix() {
    let mut conf = Conf::new();
    conf.set("base", json!("value")).unwrap();
    assert_eq!(conf.remove("base"), Some(json!("value")));
    assert_eq!(get(&mut conf, "base"), None);

    conf.set(["base", "remove"], json!("value")).unwrap();
    conf.remove(["base", "remove"]);
    assert_eq!(conf.get(["base", "remove"]).unwrap(), None);
    assert_eq!(get(&mut conf, "base"), Some(json!({})));

    assert_eq!(conf.remove("never.existed"), None);
}

#[test]
fn append_matrix() {
    let mut conf = Conf::new();
    conf.append("string", json!("value")).unwrap();
    assert_eq!(get(&mut conf, "string"), Some(json!("value")));

    conf.append(["other", "bar"], json!("value")).unwrap();
    assert_eq!(conf.get(["other", "bar"]).unwrap(), Some(&json!("value")));

    conf.append("s", json!("foo")).unwrap();
    conf.append("s", json!("bar")).unwrap();
    assert_eq!(get(&mut conf, "s"), Some(json!("foobar")));

    conf.set(["array", "append"], json!(["foo"])).unwrap();
    conf.append(["array", "append"], json!(["bar"])).unwrap();
    assert_eq!(conf.get(["array", "append"]).unwrap(), Some(&json!(["foo", "bar"])));

    conf.append("arr", json!(["x"])).unwrap();
    conf.append("arr", json!(["y"])).unwrap();
    assert_eq!(get(&mut conf, "arr"), Some(json!(["x", "y"])));
}

#[test]
fn append_type_mismatch_fails_without_mutation() {
    let mut conf = Conf::new();
    conf.set("obj", json!({})).unwrap();
    let err = conf.append("obj", json!("x")).unwrap_err();
    assert!(matches!(err, ConfError::InvalidAppend { ref location } if location == "obj"));

    conf.set("str", json!("a")).unwrap();
    assert!(matches!(conf.append("str", json!(["b"])), Err(ConfError::InvalidAppend { .. })));
    conf.set("list", json!(["a"])).unwrap();
    assert!(matches!(conf.append("list", json!("b")), Err(ConfError::InvalidAppend { .. })));
    conf.set("null", Value::Null).unwrap();
    assert!(matches!(conf.append("null", json!("b")), Err(ConfError::InvalidAppend { .. })));

    assert_eq!(conf.root(), &json!({"obj": {}, "str": "a", "list": ["a"], "null": null}));
}

#[test]
fn copy_is_independent() {
    let mut conf = Conf::new();
    conf.set("base.path.key5", json!("value")).unwrap();
    conf.set("base.path.arr", json!(["foo", "bar"])).unwrap();
    let copy = conf.copy("base.path").unwrap().unwrap();
    conf.set("base.path.key5", json!("noValue")).unwrap();
    conf.set("base.path.arr", json!(["noValue"])).unwrap();
    assert_eq!(copy, json!({"key5": "value", "arr": ["foo", "bar"]}));

    assert_eq!(conf.copy("missing").unwrap(), None);
}

#[test]
fn normalize_helpers() {
    let conf = Conf::new();
    assert_eq!(conf.normalize_location("base.path", "val"), ("base.path".to_string(), "val"));
    assert_eq!(conf.normalize_location(["base", "path"], "val"), ("base.path".to_string(), "val"));
    assert_eq!(conf.normalize_location(["", "<<"], 1).0, ".");
    assert_eq!(conf.normalize_key("foo.bar.baz"), "foo-bar-baz");
    assert_eq!(conf.key_name("base.path.key1"), Some("key1"));
    assert_eq!(conf.join(&["foo", ".", "bar", "", "baz"]), "foo.bar.baz");
}

#[test]
fn child_locations_matrix() {
    let mut conf = Conf::new();
    conf.set("children.one", json!(1)).unwrap();
    conf.set("children.two", json!(2)).unwrap();
    conf.set("children.three.key", json!(3)).unwrap();
    conf.set("children.three.two", json!(2)).unwrap();

    assert_eq!(
        conf.child_locations("children", None),
        vec!["children.one", "children.two", "children.three"]
    );
    assert_eq!(conf.child_locations(["children", "three"], Some("two")), vec!["children.three.two"]);
    assert!(conf.child_locations(".", Some("two")).is_empty());
    assert_eq!(conf.child_locations(".", Some("children")), vec!["children"]);
    assert!(conf.child_locations("children.one", None).is_empty());
    assert!(conf.child_locations("nowhere.at.all", None).is_empty());
    assert_eq!(conf.root().get("nowhere"), None);
}

#[test]
fn descendant_locations_matrix() {
    let mut conf = Conf::new();
    conf.set("descendant.one.key", json!(1)).unwrap();
    conf.set("descendant.three.two", json!(2)).unwrap();
    conf.set("descendant.three.deep.nest.key", json!(3)).unwrap();

    assert_eq!(
        conf.descendant_locations(["descendant", "three"], "key").unwrap(),
        vec!["descendant.three.deep.nest.key"]
    );
    assert_eq!(
        conf.descendant_locations("descendant", "key").unwrap(),
        vec!["descendant.one.key", "descendant.three.deep.nest.key"]
    );
    assert_eq!(
        conf.descendant_locations(".", "two").unwrap(),
        vec!["descendant.three.two"]
    );
    assert!(matches!(
        conf.descendant_locations("descendant", ""),
        Err(ConfError::MissingDescendantMatcher)
    ));
}

#[test]
fn ancestor_location_matrix() {
    let mut conf = Conf::new();
    conf.set("children.one", json!({})).unwrap();
    conf.set("children.one.two", json!({})).unwrap();
    conf.set("children.one.two.three", json!(3)).unwrap();

    assert_eq!(
        conf.ancestor_location("children.one.two.three", "one").as_deref(),
        Some("children.one")
    );
    assert_eq!(conf.ancestor_location("children.one.two", "two").as_deref(), Some("children.one.two"));
    assert_eq!(conf.ancestor_location("children.one.two.three", "children").as_deref(), Some("children"));
    assert_eq!(conf.ancestor_location(".", "children").as_deref(), Some("children"));
    assert_eq!(conf.ancestor_location(".", "one"), None);
    assert_eq!(conf.ancestor_location("asdfasdf", "one"), None);
}

#[test]
fn serialize_matrix() {
    let mut conf = Conf::from_root(json!({"top": "value"}));
    assert_eq!(conf.to_json().unwrap(), "{\n\t\"top\": \"value\"\n}");
    assert_eq!(conf.to_yaml().unwrap(), "top: value\n");

    conf.options_mut().json_indent = None;
    assert_eq!(conf.to_json().unwrap(), r#"{"top":"value"}"#);

    conf.options_mut().json_indent = Some("  ".to_string());
    conf.set("nested.list", json!([1])).unwrap();
    assert_eq!(
        conf.to_json().unwrap(),
        "{\n  \"top\": \"value\",\n  \"nested\": {\n    \"list\": [\n      1\n    ]\n  }\n}"
    );
}

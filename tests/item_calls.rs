//! Tests for forwarding shaped calls to an `ItemTarget` capability.

use kwindex::{
    bind_item_call, AccessMode, ItemTarget, Keywords, NamedEntry, NamedItem, ParameterSpec,
    RawSubscript, Signature, Value,
};

/// Target that records every operation it receives, in a compact text form
/// the assertions can compare against.
#[derive(Debug, Default)]
struct Recorder {
    log: Vec<String>,
}

fn keyword_names(keywords: &Keywords) -> String {
    keywords.keys().cloned().collect::<Vec<_>>().join(",")
}

impl ItemTarget for Recorder {
    type Error = String;

    fn get(&mut self, index: Value, keywords: Keywords, overflow: Option<Keywords>) -> Result<Value, String> {
        self.log.push(format!(
            "get {index:?} [{}] overflow={:?}",
            keyword_names(&keywords),
            overflow.as_ref().map(keyword_names),
        ));
        Ok(Value::scalar(999))
    }

    fn set(
        &mut self,
        index: Value,
        value: Value,
        keywords: Keywords,
        overflow: Option<Keywords>,
    ) -> Result<(), String> {
        self.log.push(format!(
            "set {index:?} = {value:?} [{}] overflow={:?}",
            keyword_names(&keywords),
            overflow.as_ref().map(keyword_names),
        ));
        Ok(())
    }

    fn delete(&mut self, index: Value, keywords: Keywords, overflow: Option<Keywords>) -> Result<(), String> {
        self.log.push(format!(
            "delete {index:?} [{}] overflow={:?}",
            keyword_names(&keywords),
            overflow.as_ref().map(keyword_names),
        ));
        Ok(())
    }
}

/// Target whose operations always fail, to check error passthrough.
struct Failing;

impl ItemTarget for Failing {
    type Error = String;

    fn get(&mut self, _: Value, _: Keywords, _: Option<Keywords>) -> Result<Value, String> {
        Err("target rejected get".to_owned())
    }

    fn set(&mut self, _: Value, _: Value, _: Keywords, _: Option<Keywords>) -> Result<(), String> {
        Err("target rejected set".to_owned())
    }

    fn delete(&mut self, _: Value, _: Keywords, _: Option<Keywords>) -> Result<(), String> {
        Err("target rejected delete".to_owned())
    }
}

fn getter_signature() -> Signature {
    Signature::new(
        vec![ParameterSpec::positional("index")],
        vec![ParameterSpec::named("spam").with_default(Value::scalar(1))],
    )
}

fn setter_signature() -> Signature {
    Signature::new(
        vec![
            ParameterSpec::positional("index"),
            ParameterSpec::positional("value"),
        ],
        vec![ParameterSpec::named("spam").with_default(Value::scalar(1))],
    )
}

#[test]
fn get_invocation_returns_the_target_value() {
    let mut target = Recorder::default();
    let raw = RawSubscript::index_only(Value::scalar(3));
    let call = bind_item_call(raw, &getter_signature(), AccessMode::Get, None).unwrap();
    let result = call.invoke(&mut target).unwrap();
    assert_eq!(result, Some(Value::scalar(999)));
    assert_eq!(target.log, ["get Scalar(ScalarId(3)) [spam] overflow=None"]);
}

#[test]
fn set_invocation_returns_unit() {
    let mut target = Recorder::default();
    let raw = RawSubscript::index_only(Value::scalar(3));
    let call = bind_item_call(raw, &setter_signature(), AccessMode::Set, Some(Value::scalar(7))).unwrap();
    let result = call.invoke(&mut target).unwrap();
    assert_eq!(result, None);
    assert_eq!(
        target.log,
        ["set Scalar(ScalarId(3)) = Scalar(ScalarId(7)) [spam] overflow=None"]
    );
}

#[test]
fn delete_invocation_forwards_the_same_shape_as_get() {
    let mut target = Recorder::default();
    let raw = RawSubscript::index_only(Value::scalar(3));
    let call = bind_item_call(raw, &getter_signature(), AccessMode::Delete, None).unwrap();
    assert_eq!(call.invoke(&mut target).unwrap(), None);
    assert_eq!(target.log, ["delete Scalar(ScalarId(3)) [spam] overflow=None"]);
}

#[test]
fn overflow_is_forwarded_in_collection_order() {
    let mut target = Recorder::default();
    let signature = getter_signature().with_catch_all("rest");
    let raw = RawSubscript::new(
        [Value::scalar(3)],
        vec![
            NamedItem::Entry(NamedEntry::new("zoo", Value::scalar(5))),
            NamedItem::Entry(NamedEntry::new("apple", Value::scalar(6))),
        ],
        false,
    );
    let call = bind_item_call(raw, &signature, AccessMode::Get, None).unwrap();
    call.invoke(&mut target).unwrap();
    assert_eq!(
        target.log,
        [r#"get Scalar(ScalarId(3)) [spam] overflow=Some("zoo,apple")"#]
    );
}

#[test]
fn target_errors_pass_through_untouched() {
    let mut target = Failing;
    let raw = RawSubscript::index_only(Value::scalar(3));
    let call = bind_item_call(raw, &getter_signature(), AccessMode::Get, None).unwrap();
    assert_eq!(call.invoke(&mut target), Err("target rejected get".to_owned()));
}

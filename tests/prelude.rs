//! Hooks reached through the facade crate

use hookshelf::hooks::testing::{flush, reset};
use hookshelf::prelude::*;
use rstest::rstest;
use serde_json::json;
use serial_test::serial;

#[rstest]
#[case(&[], true)]
#[case(&[1, 2, 3], true)]
#[case(&[1, 200], false)]
#[serial]
fn test_validated_list(#[case] pushes: &[i32], #[case] expected_valid: bool) {
	reset();
	let (_scope, (list, valid)) = mount(|| {
		let list = use_array(Vec::<i32>::new());
		let valid = use_memo({
			let list = list.clone();
			move || list.get().iter().all(|n| *n < 100)
		});
		(list, valid)
	});

	for n in pushes {
		list.push(*n);
	}
	assert_eq!(valid.get_untracked(), expected_valid);
}

#[test]
#[serial]
fn test_translation_and_debug_information_compose() {
	reset();
	let (_scope, (i18n, info)) = mount(|| {
		let i18n = use_translation(Translations::from([
			("en".to_string(), json!({"title": "Settings"})),
			("sp".to_string(), json!({"title": "Ajustes"})),
		]));
		let info = use_debug_information("Header", {
			let i18n = i18n.clone();
			move || [("title".to_string(), json!(i18n.t("title")))].into()
		});
		(i18n, info)
	});

	i18n.set_language("sp");
	flush();

	let info = info.get_untracked();
	assert_eq!(info.count, 2);
	assert_eq!(info.changed_props["title"].current, json!("Ajustes"));
}

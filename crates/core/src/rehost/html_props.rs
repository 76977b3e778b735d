//! Property-based tests for `<img>` discovery and rewriting.

use std::collections::HashMap;

use proptest::prelude::*;

use super::html::{collect_image_sources, rewrite_image_sources, url_path};

/// Strategy for a plain image file name.
fn file_name() -> impl Strategy<Value = String> {
    ("[a-z0-9]{1,12}", prop_oneof![Just("png"), Just("jpg"), Just("gif")])
        .prop_map(|(stem, ext)| format!("{stem}.{ext}"))
}

/// Build a fragment with one `<img>` per name, separated by text.
fn fragment(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!(r#"<p>text</p><img src="https://origin.test/{name}">"#))
        .collect()
}

proptest! {
    #[test]
    fn prop_collect_sees_every_image_in_order(names in prop::collection::vec(file_name(), 0..8)) {
        let sources = collect_image_sources(&fragment(&names)).unwrap();

        prop_assert_eq!(sources.len(), names.len());
        for (i, (source, name)) in sources.iter().zip(&names).enumerate() {
            prop_assert_eq!(source.ordinal, i);
            prop_assert_eq!(&source.src, &format!("https://origin.test/{name}"));
        }
    }

    #[test]
    fn prop_empty_rewrite_is_identity(names in prop::collection::vec(file_name(), 0..8)) {
        let html = fragment(&names);
        prop_assert_eq!(rewrite_image_sources(&html, &HashMap::new()).unwrap(), html);
    }

    #[test]
    fn prop_rewrite_only_touches_selected(
        names in prop::collection::vec(file_name(), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let html = fragment(&names);
        let target = pick.index(names.len());
        let replacements = HashMap::from([(target, "https://cdn.test/new.png".to_string())]);

        let rewritten = rewrite_image_sources(&html, &replacements).unwrap();
        let sources = collect_image_sources(&rewritten).unwrap();

        for (i, source) in sources.iter().enumerate() {
            if i == target {
                prop_assert_eq!(source.src.as_str(), "https://cdn.test/new.png");
            } else {
                prop_assert_eq!(&source.src, &format!("https://origin.test/{}", names[i]));
            }
        }
    }

    #[test]
    fn prop_url_path_drops_query_and_fragment(
        path in "(/[a-z0-9.]{1,8}){0,4}",
        query in "[a-z=&]{0,10}",
        frag in "[a-z]{0,6}",
    ) {
        let url = format!("https://host.test{path}?{query}#{frag}");
        let got = url_path(&url);
        prop_assert_eq!(got, path.as_str());
    }
}

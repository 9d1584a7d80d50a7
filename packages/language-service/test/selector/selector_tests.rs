use angular_language_service::directive_matching::{CssSelector, SelectorError, SelectorMatcher};

#[cfg(test)]
mod tests {
    use super::*;

    // Element selector the way the language service builds it: parsed from
    // the serialized `tag[name=value]...` form of a template element.
    fn host(selector: &str) -> CssSelector {
        CssSelector::parse(selector).unwrap().remove(0)
    }

    fn matches(matcher: &SelectorMatcher<i32>, selector: &str) -> Vec<i32> {
        let mut matched = Vec::new();
        matcher.match_selector(&host(selector), |_, c| matched.push(*c));
        matched.sort();
        matched
    }

    #[test]
    fn should_select_by_element_name_case_sensitive() {
        let mut matcher = SelectorMatcher::new();
        matcher.add_selectables(CssSelector::parse("someTag").unwrap(), 1);

        assert!(matches(&matcher, "SOMEOTHERTAG").is_empty());
        assert!(matches(&matcher, "SOMETAG").is_empty());
        assert_eq!(matches(&matcher, "someTag"), vec![1]);
    }

    #[test]
    fn should_not_select_element_pattern_without_element() {
        let mut matcher = SelectorMatcher::new();
        matcher.add_selectables(CssSelector::parse("div[myAttr]").unwrap(), 1);
        matcher.add_selectables(CssSelector::parse("[myAttr]").unwrap(), 2);

        assert_eq!(matches(&matcher, "[myAttr=]"), vec![2]);
        assert_eq!(matches(&matcher, "div[myAttr=]"), vec![1, 2]);
        assert_eq!(matches(&matcher, "span[myAttr=]"), vec![2]);
    }

    #[test]
    fn should_select_by_attr_name_case_sensitive_independent_of_value() {
        let mut matcher = SelectorMatcher::new();
        matcher.add_selectables(CssSelector::parse("[someAttr]").unwrap(), 1);
        matcher.add_selectables(CssSelector::parse("[someAttr][someAttr2]").unwrap(), 2);

        assert!(matches(&matcher, "[SOMEOTHERATTR=]").is_empty());
        assert!(matches(&matcher, "[SOMEATTR=]").is_empty());
        assert_eq!(matches(&matcher, "[someAttr=]"), vec![1]);
        assert_eq!(matches(&matcher, "[someAttr=][someAttr2=]"), vec![1, 2]);
        assert_eq!(matches(&matcher, "[someAttr=someValue][someAttr2=]"), vec![1, 2]);
    }

    #[test]
    fn should_select_by_attr_name_case_sensitive_and_value_case_insensitive() {
        let mut matcher = SelectorMatcher::new();
        matcher.add_selectables(CssSelector::parse("[someAttr=someValue]").unwrap(), 1);

        assert!(matches(&matcher, "[SOMEATTR=SOMEOTHERATTR]").is_empty());
        assert!(matches(&matcher, "[someAttr=]").is_empty());
        assert_eq!(matches(&matcher, "[someAttr=SOMEVALUE]"), vec![1]);
    }

    #[test]
    fn should_support_dot_in_attribute_names() {
        let mut matcher = SelectorMatcher::new();
        matcher.add_selectables(CssSelector::parse("[foo.bar]").unwrap(), 1);

        assert!(matches(&matcher, "[barfoo=]").is_empty());
        assert_eq!(matches(&matcher, "[foo.bar=]"), vec![1]);
    }

    #[test]
    fn should_select_by_many_attributes_and_independent_of_value() {
        let mut matcher = SelectorMatcher::new();
        matcher.add_selectables(CssSelector::parse("input[type=text][control]").unwrap(), 1);

        assert_eq!(matches(&matcher, "input[type=text][control=one]"), vec![1]);
        assert!(matches(&matcher, "input[type=checkbox][control=one]").is_empty());
    }

    #[test]
    fn should_not_select_with_matching_not_selector() {
        let mut matcher = SelectorMatcher::new();
        matcher.add_selectables(CssSelector::parse("p:not([someAttr])").unwrap(), 1);
        matcher.add_selectables(CssSelector::parse(":not(p)").unwrap(), 2);
        matcher.add_selectables(CssSelector::parse(":not(p[someAttr])").unwrap(), 3);

        assert!(matches(&matcher, "p[someAttr=]").is_empty());
    }

    #[test]
    fn should_select_with_non_matching_not_selector() {
        let mut matcher = SelectorMatcher::new();
        matcher.add_selectables(CssSelector::parse("p:not([someAttr])").unwrap(), 1);
        matcher.add_selectables(CssSelector::parse(":not([someAttr])").unwrap(), 2);

        assert_eq!(matches(&matcher, "p[someOtherAttr=]"), vec![1, 2]);
    }

    #[test]
    fn should_match_with_multiple_not_selectors() {
        let mut matcher = SelectorMatcher::new();
        matcher.add_selectables(CssSelector::parse("div:not([a]):not([b])").unwrap(), 1);

        assert!(matches(&matcher, "div[a=]").is_empty());
        assert!(matches(&matcher, "div[b=]").is_empty());
        assert_eq!(matches(&matcher, "div[c=]"), vec![1]);
    }

    #[test]
    fn should_select_with_one_match_in_list() {
        let mut matcher = SelectorMatcher::new();
        matcher.add_selectables(CssSelector::parse("input[type=text], textbox").unwrap(), 1);

        assert_eq!(matches(&matcher, "textbox"), vec![1]);
        assert_eq!(matches(&matcher, "input[type=text]"), vec![1]);
    }

    // CssSelector.parse tests

    #[test]
    fn should_detect_attr_names_with_escaped_dollar() {
        let css_selector = &CssSelector::parse(r#"[attrname\$]"#).unwrap()[0];
        assert_eq!(css_selector.attrs, vec!["attrname$", ""]);
        assert_eq!(css_selector.to_string(), r#"[attrname\$]"#);
    }

    #[test]
    fn should_error_on_attr_names_with_unescaped_dollar() {
        assert!(matches!(
            CssSelector::parse("[attrname$]"),
            Err(SelectorError::UnescapedDollar(_))
        ));
        assert!(CssSelector::parse("[$attrname]").is_err());
    }

    #[test]
    fn should_detect_attr_values_with_quotes() {
        let double = &CssSelector::parse("[attrname=\"attrvalue\"]").unwrap()[0];
        let single = &CssSelector::parse("[attrname='attrvalue']").unwrap()[0];
        assert_eq!(double.attrs, vec!["attrname", "attrvalue"]);
        assert_eq!(single.to_string(), "[attrname=attrvalue]");
    }

    #[test]
    fn should_detect_hashed_syntax_and_treat_as_attribute() {
        let css_selector = &CssSelector::parse("#some-value").unwrap()[0];
        assert_eq!(css_selector.attrs, vec!["id", "some-value"]);
    }

    #[test]
    fn should_keep_value_with_spaces_from_template_attribute() {
        let css_selector = &CssSelector::parse("li[ngFor=][ngForOf=items | async]").unwrap()[0];
        assert_eq!(css_selector.element.as_deref(), Some("li"));
        assert_eq!(css_selector.get_attr("ngForOf"), Some("items | async"));
    }

    #[test]
    fn should_detect_not() {
        let css_selector =
            &CssSelector::parse("sometag:not([attrname=attrvalue].someclass)").unwrap()[0];
        assert_eq!(css_selector.element, Some("sometag".to_string()));
        assert!(css_selector.attrs.is_empty());

        let not_selector = &css_selector.not_selectors[0];
        assert!(not_selector.element.is_none());
        assert_eq!(not_selector.attrs, vec!["attrname", "attrvalue"]);
        assert_eq!(not_selector.class_names, vec!["someclass"]);
    }

    #[test]
    fn should_detect_lists_of_selectors() {
        let css_selectors = CssSelector::parse(".someclass,[attrname=attrvalue], sometag").unwrap();
        assert_eq!(css_selectors.len(), 3);
        assert_eq!(css_selectors[0].class_names, vec!["someclass"]);
        assert_eq!(css_selectors[1].attrs, vec!["attrname", "attrvalue"]);
        assert_eq!(css_selectors[2].element, Some("sometag".to_string()));
    }
}

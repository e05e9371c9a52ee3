//! Foundation-styled form rendering.
//!
//! A renderable form element is one of three shapes, fixed when the element
//! is built:
//!
//! | Variant | Markup |
//! |---|---|
//! | [`FormElement::SingleField`] | one `div.row` with label, widget, help and errors |
//! | [`FormElement::Form`] | non-field errors in an alert box, then every field |
//! | [`FormElement::FormSet`] | management inputs, then one `fieldset` per form |
//!
//! Checkboxes put the label after the input and radio selects render one
//! input per choice; [`is_checkbox`] and [`is_radio`] pick those layouts.
//! All text is escaped by Maud.

use maud::{Markup, html};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    TextInput,
    EmailInput,
    PasswordInput,
    NumberInput,
    Textarea,
    Select,
    CheckboxInput,
    RadioSelect,
    HiddenInput,
}

impl WidgetKind {
    fn input_type(self) -> &'static str {
        match self {
            WidgetKind::EmailInput => "email",
            WidgetKind::PasswordInput => "password",
            WidgetKind::NumberInput => "number",
            WidgetKind::CheckboxInput => "checkbox",
            WidgetKind::RadioSelect => "radio",
            WidgetKind::HiddenInput => "hidden",
            _ => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A form field together with its submitted value and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundField {
    pub name: String,
    pub label: String,
    pub widget: WidgetKind,
    pub value: Option<String>,
    pub choices: Vec<Choice>,
    pub help_text: Option<String>,
    pub errors: Vec<String>,
    pub required: bool,
}

impl BoundField {
    pub fn new(name: impl Into<String>, label: impl Into<String>, widget: WidgetKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            widget,
            value: None,
            choices: Vec::new(),
            help_text: None,
            errors: Vec::new(),
            required: false,
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        self
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.errors.push(message.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn is_selected(&self, value: &str) -> bool {
        self.value.as_deref() == Some(value)
    }

    fn is_checked(&self) -> bool {
        matches!(self.value.as_deref(), Some("on" | "true" | "1"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<BoundField>,
    /// Errors not tied to a single field.
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSet {
    pub prefix: String,
    pub forms: Vec<Form>,
    /// Leading forms that edit existing records.
    pub initial_forms: usize,
    pub min_num: usize,
    pub max_num: usize,
}

impl FormSet {
    pub fn new(prefix: impl Into<String>, forms: Vec<Form>) -> Self {
        Self {
            prefix: prefix.into(),
            forms,
            initial_forms: 0,
            min_num: 0,
            max_num: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormElement {
    SingleField(BoundField),
    FormSet(FormSet),
    Form(Form),
}

pub fn is_checkbox(field: &BoundField) -> bool {
    field.widget == WidgetKind::CheckboxInput
}

pub fn is_radio(field: &BoundField) -> bool {
    field.widget == WidgetKind::RadioSelect
}

/// Render any form element with Foundation grid markup.
pub fn foundation(element: &FormElement) -> Markup {
    match element {
        FormElement::SingleField(field) => render_field(field, &field.name),
        FormElement::Form(form) => render_form(form, None),
        FormElement::FormSet(formset) => render_formset(formset),
    }
}

fn field_id(name: &str) -> String {
    format!("id_{name}")
}

fn render_widget(field: &BoundField, name: &str) -> Markup {
    let id = field_id(name);
    html! {
        @match field.widget {
            WidgetKind::Textarea => {
                textarea name=(name) id=(id) required[field.required] {
                    (field.value.as_deref().unwrap_or_default())
                }
            }
            WidgetKind::Select => {
                select name=(name) id=(id) required[field.required] {
                    @for choice in &field.choices {
                        option value=(choice.value) selected[field.is_selected(&choice.value)] {
                            (choice.label)
                        }
                    }
                }
            }
            WidgetKind::CheckboxInput => {
                input type="checkbox" name=(name) id=(id) checked[field.is_checked()];
            }
            WidgetKind::RadioSelect => {
                @for (i, choice) in field.choices.iter().enumerate() {
                    @let choice_id = format!("{id}_{i}");
                    input type="radio" name=(name) id=(choice_id) value=(choice.value)
                        checked[field.is_selected(&choice.value)];
                    label for=(choice_id) { (choice.label) }
                }
            }
            kind => {
                input type=(kind.input_type()) name=(name) id=(id)
                    value=[field.value.as_deref()] required[field.required];
            }
        }
    }
}

fn render_field(field: &BoundField, name: &str) -> Markup {
    if field.widget == WidgetKind::HiddenInput {
        return render_widget(field, name);
    }

    let has_errors = !field.errors.is_empty();
    html! {
        div.row {
            div.large-12.columns.error[has_errors] {
                @if is_checkbox(field) {
                    (render_widget(field, name))
                    label for=(field_id(name)) { (field.label) }
                } @else if is_radio(field) {
                    label { (field.label) }
                    (render_widget(field, name))
                } @else {
                    label for=(field_id(name)) {
                        (field.label)
                        (render_widget(field, name))
                    }
                }
                @if let Some(help) = &field.help_text {
                    p.help-text { (help) }
                }
                @for error in &field.errors {
                    small.error { (error) }
                }
            }
        }
    }
}

fn render_form(form: &Form, prefix: Option<&str>) -> Markup {
    html! {
        @if !form.errors.is_empty() {
            div.alert-box.alert data-alert {
                @for error in &form.errors {
                    p { (error) }
                }
            }
        }
        @for field in &form.fields {
            @let name = match prefix {
                Some(prefix) => format!("{prefix}-{}", field.name),
                None => field.name.clone(),
            };
            (render_field(field, &name))
        }
    }
}

fn render_formset(formset: &FormSet) -> Markup {
    let prefix = &formset.prefix;
    let management = [
        ("TOTAL_FORMS", formset.forms.len()),
        ("INITIAL_FORMS", formset.initial_forms),
        ("MIN_NUM_FORMS", formset.min_num),
        ("MAX_NUM_FORMS", formset.max_num),
    ];
    html! {
        @for (key, count) in management {
            @let name = format!("{prefix}-{key}");
            input type="hidden" name=(name) id=(field_id(&name)) value=(count);
        }
        @for (i, form) in formset.forms.iter().enumerate() {
            fieldset {
                (render_form(form, Some(&format!("{prefix}-{i}"))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(element: FormElement) -> String {
        foundation(&element).into_string()
    }

    fn title_field() -> BoundField {
        BoundField::new("title", "Title", WidgetKind::TextInput)
            .value("Dawn")
            .required()
    }

    #[test]
    fn predicates_follow_widget_kind() {
        assert!(is_checkbox(&BoundField::new("a", "A", WidgetKind::CheckboxInput)));
        assert!(!is_checkbox(&BoundField::new("a", "A", WidgetKind::TextInput)));
        assert!(is_radio(&BoundField::new("a", "A", WidgetKind::RadioSelect)));
        assert!(!is_radio(&BoundField::new("a", "A", WidgetKind::Select)));
    }

    #[test]
    fn single_field_wraps_input_in_label() {
        let html = render(FormElement::SingleField(title_field()));
        assert!(html.contains(r#"<div class="row">"#), "{html}");
        assert!(html.contains(r#"<label for="id_title">Title<input"#), "{html}");
        assert!(html.contains(r#"name="title""#), "{html}");
        assert!(html.contains(r#"value="Dawn""#), "{html}");
        assert!(html.contains("required"), "{html}");
    }

    #[test]
    fn field_errors_mark_column() {
        let field = title_field().error("Too short");
        let html = render(FormElement::SingleField(field));
        assert!(html.contains(r#"class="large-12 columns error""#), "{html}");
        assert!(html.contains(r#"<small class="error">Too short</small>"#), "{html}");
    }

    #[test]
    fn checkbox_label_follows_input() {
        let field = BoundField::new("publish", "Publish", WidgetKind::CheckboxInput).value("on");
        let html = render(FormElement::SingleField(field));
        let input_at = html.find("<input").unwrap();
        let label_at = html.find(r#"<label for="id_publish">"#).unwrap();
        assert!(input_at < label_at, "{html}");
        assert!(html.contains("checked"), "{html}");
    }

    #[test]
    fn radio_renders_one_input_per_choice() {
        let field = BoundField::new("anchor", "Anchor", WidgetKind::RadioSelect)
            .choices(vec![
                Choice::new("top", "Top"),
                Choice::new("middle", "Middle"),
                Choice::new("bottom", "Bottom"),
            ])
            .value("middle");
        let html = render(FormElement::SingleField(field));
        assert_eq!(html.matches(r#"type="radio""#).count(), 3, "{html}");
        assert!(html.contains(r#"id="id_anchor_1""#), "{html}");
        assert_eq!(html.matches("checked").count(), 1, "{html}");
    }

    #[test]
    fn select_marks_current_choice() {
        let field = BoundField::new("site", "Site", WidgetKind::Select)
            .choices(vec![Choice::new("1", "Main"), Choice::new("2", "Blog")])
            .value("2");
        let html = render(FormElement::SingleField(field));
        assert!(html.contains(r#"<option value="2" selected>Blog</option>"#), "{html}");
        assert!(html.contains(r#"<option value="1">Main</option>"#), "{html}");
    }

    #[test]
    fn hidden_field_has_no_row() {
        let field = BoundField::new("token", "", WidgetKind::HiddenInput).value("abc");
        let html = render(FormElement::SingleField(field));
        assert!(!html.contains("row"), "{html}");
        assert!(html.contains(r#"type="hidden""#), "{html}");
    }

    #[test]
    fn values_are_escaped() {
        let field = BoundField::new("body", "Body", WidgetKind::Textarea).value("<script>");
        let html = render(FormElement::SingleField(field));
        assert!(html.contains("&lt;script&gt;"), "{html}");
        assert!(!html.contains("<script>"), "{html}");
    }

    #[test]
    fn form_shows_non_field_errors() {
        let form = Form {
            fields: vec![title_field()],
            errors: vec!["Slug already taken".into()],
        };
        let html = render(FormElement::Form(form));
        assert!(html.contains(r#"class="alert-box alert""#), "{html}");
        assert!(html.contains("<p>Slug already taken</p>"), "{html}");
        assert!(html.contains(r#"name="title""#), "{html}");
    }

    #[test]
    fn formset_emits_management_form_and_prefixes() {
        let forms = vec![
            Form {
                fields: vec![title_field()],
                errors: vec![],
            },
            Form {
                fields: vec![title_field()],
                errors: vec![],
            },
        ];
        let mut formset = FormSet::new("photos", forms);
        formset.initial_forms = 1;

        let html = render(FormElement::FormSet(formset));
        assert!(
            html.contains(r#"name="photos-TOTAL_FORMS" id="id_photos-TOTAL_FORMS" value="2""#),
            "{html}"
        );
        assert!(html.contains(r#"name="photos-INITIAL_FORMS""#), "{html}");
        assert!(html.contains(r#"name="photos-MAX_NUM_FORMS""#), "{html}");
        assert!(html.contains(r#"name="photos-0-title""#), "{html}");
        assert!(html.contains(r#"name="photos-1-title""#), "{html}");
        assert_eq!(html.matches("<fieldset>").count(), 2, "{html}");
    }
}

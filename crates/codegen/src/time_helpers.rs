//! Time-format adapter file generation.
//!
//! Each of the five wire formats gets its own adapter type wrapping
//! `time.Time` with exact marshal/text/string behavior. A raw `time.Time`
//! never crosses the wire without passing through the matching adapter.

use gosdk_codemodel::{CodeModel, Package, SerdeFormat, TimeFormat, WireType};

use crate::helpers::{content_preamble, CORE_MODULE};
use crate::imports::ImportManager;
use crate::serde_format::SerdeFormatIndex;

/// A generated helper file.
#[derive(Debug)]
pub struct Content {
    pub name: String,
    pub content: String,
}

/// Which helper files a package needs, derived from the types that appear
/// in its models, parameters, and response envelopes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MarshallingRequirements {
    pub rfc1123: bool,
    pub rfc3339_date_time: bool,
    pub rfc3339_time: bool,
    pub unix_time: bool,
    pub date: bool,
}

impl MarshallingRequirements {
    /// Scans the package for time formats in wire positions.
    pub fn scan(pkg: &Package) -> Self {
        let mut reqs = MarshallingRequirements::default();
        let mut note = |ty: &WireType| {
            if let WireType::Time { format, .. } = ty.unwrap_collection() {
                match format {
                    TimeFormat::DateType => reqs.date = true,
                    TimeFormat::DateTimeRfc1123 => reqs.rfc1123 = true,
                    TimeFormat::DateTimeRfc3339 => reqs.rfc3339_date_time = true,
                    TimeFormat::TimeRfc3339 => reqs.rfc3339_time = true,
                    TimeFormat::TimeUnix => reqs.unix_time = true,
                }
            }
        };

        for model in &pkg.models {
            for field in &model.fields {
                note(&field.ty);
            }
        }
        for group in &pkg.param_groups {
            for field in &group.fields {
                note(&field.ty);
            }
        }
        for client in &pkg.clients {
            for method in &client.methods {
                for param in &method.parameters {
                    note(&param.ty);
                }
                for header in &method.response_envelope.headers {
                    note(header.field_type());
                }
                if let Some(result) = &method.response_envelope.result {
                    note(&result.field_type());
                }
            }
        }
        reqs
    }

    fn any(self) -> bool {
        self.rfc1123 || self.rfc3339_date_time || self.rfc3339_time || self.unix_time || self.date
    }
}

/// Creates the content for the required time marshalling helper files.
/// Empty when no time types are in use.
pub fn generate_time_helpers(code_model: &CodeModel, pkg: &Package) -> Vec<Content> {
    let reqs = MarshallingRequirements::scan(pkg);
    let mut content = Vec::new();
    if !reqs.any() {
        return content;
    }

    // populate/unpopulate pairs are JSON-only; they're needed when any JSON
    // model carries a time field
    let formats = SerdeFormatIndex::build(pkg);
    let needs_populate = pkg.models.iter().any(|model| {
        formats.format_for(model) == SerdeFormat::Json
            && model
                .fields
                .iter()
                .any(|f| matches!(f.ty.unwrap_collection(), WireType::Time { .. }))
    });

    if reqs.rfc1123 {
        content.push(Content {
            name: "time_rfc1123".to_string(),
            content: rfc1123_helper(code_model, pkg, needs_populate),
        });
    }
    if reqs.rfc3339_date_time || reqs.rfc3339_time {
        content.push(Content {
            name: "time_rfc3339".to_string(),
            content: rfc3339_helper(code_model, pkg, reqs.rfc3339_date_time, reqs.rfc3339_time, needs_populate),
        });
    }
    if reqs.unix_time {
        content.push(Content {
            name: "time_unix".to_string(),
            content: unix_time_helper(code_model, pkg, needs_populate),
        });
    }
    if reqs.date {
        content.push(Content {
            name: "date_type".to_string(),
            content: date_helper(code_model, pkg, needs_populate),
        });
    }
    content
}

fn populate_imports(imports: &mut ImportManager) {
    imports.add("encoding/json", None);
    imports.add("fmt", None);
    imports.add(CORE_MODULE, None);
    imports.add("reflect", None);
}

fn populate_pair(adapter: &str, suffix: &str) -> String {
    format!(
        r#"
func populate{suffix}(m map[string]any, k string, t *time.Time) {{
	if t == nil {{
		return
	}} else if core.IsNullValue(t) {{
		m[k] = nil
		return
	}} else if reflect.ValueOf(t).IsNil() {{
		return
	}}
	m[k] = (*{adapter})(t)
}}

func unpopulate{suffix}(data json.RawMessage, fn string, t **time.Time) error {{
	if data == nil || string(data) == "null" {{
		return nil
	}}
	var aux {adapter}
	if err := json.Unmarshal(data, &aux); err != nil {{
		return fmt.Errorf("struct field %s: %v", fn, err)
	}}
	*t = (*time.Time)(&aux)
	return nil
}}
"#
    )
}

fn rfc1123_helper(code_model: &CodeModel, pkg: &Package, needs_populate: bool) -> String {
    let mut imports = ImportManager::new();
    imports.add("strings", None);
    imports.add("time", None);
    if needs_populate {
        populate_imports(&mut imports);
    }
    let mut text = content_preamble(code_model, &pkg.name);
    text.push_str(&imports.text());
    text.push_str(
        r#"const (
	dateTimeRFC1123JSON = `"` + time.RFC1123 + `"`
)

type dateTimeRFC1123 time.Time

func (t dateTimeRFC1123) MarshalJSON() ([]byte, error) {
	b := []byte(time.Time(t).Format(dateTimeRFC1123JSON))
	return b, nil
}

func (t dateTimeRFC1123) MarshalText() ([]byte, error) {
	b := []byte(time.Time(t).Format(time.RFC1123))
	return b, nil
}

func (t *dateTimeRFC1123) UnmarshalJSON(data []byte) error {
	p, err := time.Parse(dateTimeRFC1123JSON, strings.ToUpper(string(data)))
	*t = dateTimeRFC1123(p)
	return err
}

func (t *dateTimeRFC1123) UnmarshalText(data []byte) error {
	p, err := time.Parse(time.RFC1123, string(data))
	*t = dateTimeRFC1123(p)
	return err
}

func (t dateTimeRFC1123) String() string {
	return time.Time(t).Format(time.RFC1123)
}
"#,
    );
    if needs_populate {
        text.push_str(&populate_pair("dateTimeRFC1123", "DateTimeRFC1123"));
    }
    text
}

fn rfc3339_helper(
    code_model: &CodeModel,
    pkg: &Package,
    date_time: bool,
    time_of_day: bool,
    needs_populate: bool,
) -> String {
    let mut imports = ImportManager::new();
    imports.add("regexp", None);
    imports.add("strings", None);
    imports.add("time", None);
    if time_of_day {
        imports.add("fmt", None);
    }
    if needs_populate {
        populate_imports(&mut imports);
    }
    let mut text = content_preamble(code_model, &pkg.name);
    text.push_str(&imports.text());
    text.push_str(
        r#"// some services report UTC times without the 'Z' time zone suffix.
var tzOffsetRegex = regexp.MustCompile(`(Z|z|\+|-)(\d+:\d+)*"*$`)
"#,
    );

    if date_time {
        text.push_str(
            r#"
const (
	utcDateTimeJSON = `"2006-01-02T15:04:05.999999999"`
	utcDateTime     = "2006-01-02T15:04:05.999999999"
	dateTimeJSON    = `"` + time.RFC3339Nano + `"`
)

type dateTimeRFC3339 time.Time

func (t dateTimeRFC3339) MarshalJSON() ([]byte, error) {
	tt := time.Time(t)
	return tt.MarshalJSON()
}

func (t dateTimeRFC3339) MarshalText() ([]byte, error) {
	tt := time.Time(t)
	return tt.MarshalText()
}

func (t *dateTimeRFC3339) UnmarshalJSON(data []byte) error {
	layout := utcDateTimeJSON
	if tzOffsetRegex.Match(data) {
		layout = dateTimeJSON
	}
	return t.Parse(layout, string(data))
}

func (t *dateTimeRFC3339) UnmarshalText(data []byte) error {
	layout := utcDateTime
	if tzOffsetRegex.Match(data) {
		layout = time.RFC3339Nano
	}
	return t.Parse(layout, string(data))
}

func (t *dateTimeRFC3339) Parse(layout, value string) error {
	p, err := time.Parse(layout, strings.ToUpper(value))
	*t = dateTimeRFC3339(p)
	return err
}

func (t dateTimeRFC3339) String() string {
	return time.Time(t).Format(time.RFC3339Nano)
}
"#,
        );
        if needs_populate {
            text.push_str(&populate_pair("dateTimeRFC3339", "DateTimeRFC3339"));
        }
    }

    if time_of_day {
        text.push_str(
            r#"
const (
	utcTimeJSON = `"15:04:05.999999999"`
	utcTime     = "15:04:05.999999999"
	timeFormat  = "15:04:05.999999999Z07:00"
)

type timeRFC3339 time.Time

func (t timeRFC3339) MarshalJSON() ([]byte, error) {
	s, _ := t.MarshalText()
	return []byte(fmt.Sprintf("\"%s\"", s)), nil
}

func (t timeRFC3339) MarshalText() ([]byte, error) {
	tt := time.Time(t)
	return []byte(tt.Format(timeFormat)), nil
}

func (t *timeRFC3339) UnmarshalJSON(data []byte) error {
	layout := utcTimeJSON
	if tzOffsetRegex.Match(data) {
		layout = timeFormat
	}
	return t.Parse(layout, string(data))
}

func (t *timeRFC3339) UnmarshalText(data []byte) error {
	layout := utcTime
	if tzOffsetRegex.Match(data) {
		layout = timeFormat
	}
	return t.Parse(layout, string(data))
}

func (t *timeRFC3339) Parse(layout, value string) error {
	p, err := time.Parse(layout, strings.ToUpper(value))
	*t = timeRFC3339(p)
	return err
}

func (t timeRFC3339) String() string {
	tt := time.Time(t)
	return tt.Format(timeFormat)
}
"#,
        );
        if needs_populate {
            text.push_str(&populate_pair("timeRFC3339", "TimeRFC3339"));
        }
    }
    text
}

fn unix_time_helper(code_model: &CodeModel, pkg: &Package, needs_populate: bool) -> String {
    let mut imports = ImportManager::new();
    imports.add("encoding/json", None);
    imports.add("fmt", None);
    imports.add("time", None);
    if needs_populate {
        imports.add(CORE_MODULE, None);
        imports.add("reflect", None);
    }
    let mut text = content_preamble(code_model, &pkg.name);
    text.push_str(&imports.text());
    text.push_str(
        r#"type timeUnix time.Time

func (t timeUnix) MarshalJSON() ([]byte, error) {
	return json.Marshal(time.Time(t).Unix())
}

func (t *timeUnix) UnmarshalJSON(data []byte) error {
	var seconds int64
	if err := json.Unmarshal(data, &seconds); err != nil {
		return err
	}
	*t = timeUnix(time.Unix(seconds, 0))
	return nil
}

func (t timeUnix) String() string {
	return fmt.Sprintf("%d", time.Time(t).Unix())
}
"#,
    );
    if needs_populate {
        text.push_str(&populate_pair("timeUnix", "TimeUnix"));
    }
    text
}

fn date_helper(code_model: &CodeModel, pkg: &Package, needs_populate: bool) -> String {
    let mut imports = ImportManager::new();
    imports.add("fmt", None);
    imports.add("time", None);
    if needs_populate {
        imports.add("encoding/json", None);
        imports.add(CORE_MODULE, None);
        imports.add("reflect", None);
    }
    let mut text = content_preamble(code_model, &pkg.name);
    text.push_str(&imports.text());
    text.push_str(
        r#"const (
	fullDateJSON = `"2006-01-02"`
	jsonFormat   = `"%04d-%02d-%02d"`
)

type dateType time.Time

func (t dateType) MarshalJSON() ([]byte, error) {
	return []byte(fmt.Sprintf(jsonFormat, time.Time(t).Year(), time.Time(t).Month(), time.Time(t).Day())), nil
}

func (d *dateType) UnmarshalJSON(data []byte) (err error) {
	t, err := time.Parse(fullDateJSON, string(data))
	*d = (dateType)(t)
	return err
}
"#,
    );
    if needs_populate {
        text.push_str(&populate_pair("dateType", "DateType"));
    }
    text
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use gosdk_codemodel::{
        CodeModelKind, Docs, FieldAnnotations, Info, Model, ModelAnnotations, ModelField, Module,
        Options, UsageFlags,
    };

    fn code_model() -> CodeModel {
        CodeModel {
            info: Info { title: "test".to_string() },
            kind: CodeModelKind::DataPlane,
            options: Options::default(),
            module: Module {
                identity: "github.com/contoso/widgets".to_string(),
                version: "0.1.0".to_string(),
            },
            packages: Vec::new(),
        }
    }

    fn pkg_with_time(format: TimeFormat) -> Package {
        Package {
            name: "widgets".to_string(),
            constants: Vec::new(),
            interfaces: Vec::new(),
            models: vec![Model {
                name: "Widget".to_string(),
                docs: Docs::default(),
                fields: vec![ModelField {
                    name: "Created".to_string(),
                    docs: Docs::default(),
                    ty: WireType::Time { format, utc: true },
                    by_value: false,
                    serialized_name: "created".to_string(),
                    annotations: FieldAnnotations::default(),
                    default_value: None,
                    xml: None,
                }],
                annotations: ModelAnnotations::default(),
                usage: UsageFlags::INPUT | UsageFlags::OUTPUT,
                xml: None,
                polymorphic: None,
            }],
            param_groups: Vec::new(),
            clients: Vec::new(),
        }
    }

    #[test]
    fn no_time_types_means_no_helpers() {
        let pkg = Package {
            name: "widgets".to_string(),
            constants: Vec::new(),
            interfaces: Vec::new(),
            models: Vec::new(),
            param_groups: Vec::new(),
            clients: Vec::new(),
        };
        assert!(generate_time_helpers(&code_model(), &pkg).is_empty());
    }

    #[test]
    fn rfc3339_helper_carries_adapter_and_populate_pair() {
        let files = generate_time_helpers(&code_model(), &pkg_with_time(TimeFormat::DateTimeRfc3339));
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "time_rfc3339");
        let text = &files[0].content;
        assert!(text.contains("type dateTimeRFC3339 time.Time"));
        assert!(text.contains("func populateDateTimeRFC3339(m map[string]any, k string, t *time.Time) {"));
        assert!(text.contains("func unpopulateDateTimeRFC3339(data json.RawMessage, fn string, t **time.Time) error {"));
        // the time-of-day adapter is not dragged in
        assert!(!text.contains("type timeRFC3339 time.Time"));
    }

    #[test]
    fn unix_helper_marshals_epoch_seconds() {
        let files = generate_time_helpers(&code_model(), &pkg_with_time(TimeFormat::TimeUnix));
        assert_eq!(files[0].name, "time_unix");
        assert!(files[0].content.contains("return json.Marshal(time.Time(t).Unix())"));
    }

    #[test]
    fn date_helper_uses_plain_date_format() {
        let files = generate_time_helpers(&code_model(), &pkg_with_time(TimeFormat::DateType));
        assert_eq!(files[0].name, "date_type");
        assert!(files[0].content.contains("fullDateJSON = `\"2006-01-02\"`"));
    }

    #[test]
    fn scan_finds_time_inside_collections() {
        let mut pkg = pkg_with_time(TimeFormat::DateTimeRfc1123);
        pkg.models[0].fields[0].ty = WireType::Slice {
            element_type: Box::new(WireType::Time { format: TimeFormat::DateTimeRfc1123, utc: false }),
            by_value: false,
        };
        let reqs = MarshallingRequirements::scan(&pkg);
        assert!(reqs.rfc1123);
        assert!(!reqs.date);
    }
}

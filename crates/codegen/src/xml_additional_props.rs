//! Token-level XML codec for additional-properties maps.
//!
//! Map iteration order and an arbitrary element name prevent a declarative
//! tag-based mapping, so this is the one place XML serde drops down to
//! explicit token writing.

use gosdk_codemodel::{CodeModel, Package, SerdeFormat, WireType};

use crate::helpers::{content_preamble, CORE_TO_MODULE};
use crate::imports::ImportManager;
use crate::serde_format::SerdeFormatIndex;

/// Creates the content for the additional-properties XML helpers file, or
/// the empty string when no XML model carries a map field.
pub fn generate_xml_additional_props_helpers(code_model: &CodeModel, pkg: &Package) -> String {
    let formats = SerdeFormatIndex::build(pkg);
    let required = pkg.models.iter().any(|model| {
        formats.format_for(model) == SerdeFormat::Xml
            && model.fields.iter().any(|f| matches!(f.ty, WireType::Map { .. }))
    });
    if !required {
        return String::new();
    }

    let mut text = content_preamble(code_model, &pkg.name);
    let mut imports = ImportManager::new();
    imports.add("encoding/xml", None);
    imports.add("errors", None);
    imports.add(CORE_TO_MODULE, None);
    imports.add("io", None);
    imports.add("strings", None);
    text.push_str(&imports.text());
    text.push_str(
        r#"type additionalProperties map[string]*string

// MarshalXML implements the xml.Marshaler interface for additionalProperties.
func (ap additionalProperties) MarshalXML(e *xml.Encoder, start xml.StartElement) error {
	if err := e.EncodeToken(start); err != nil {
		return err
	}
	for k, v := range ap {
		err := e.EncodeToken(xml.StartElement{
			Name: xml.Name{
				Local: k,
			},
		})
		if err != nil {
			return err
		}
		if v != nil {
			err = e.EncodeToken(xml.CharData(*v))
			if err != nil {
				return err
			}
		}
		err = e.EncodeToken(xml.EndElement{
			Name: xml.Name{
				Local: k,
			},
		})
		if err != nil {
			return err
		}
	}
	return e.EncodeToken(xml.EndElement{
		Name: start.Name,
	})
}

// UnmarshalXML implements the xml.Unmarshaler interface for additionalProperties.
func (ap *additionalProperties) UnmarshalXML(d *xml.Decoder, start xml.StartElement) error {
	tokName := ""
	tokValue := ""
	for {
		t, err := d.Token()
		if errors.Is(err, io.EOF) {
			break
		} else if err != nil {
			return err
		}
		switch tt := t.(type) {
		case xml.StartElement:
			tokName = strings.ToLower(tt.Name.Local)
			tokValue = ""
		case xml.CharData:
			if tokName == "" {
				continue
			}
			tokValue = string(tt)
		case xml.EndElement:
			if tokName == "" {
				continue
			}
			if *ap == nil {
				*ap = additionalProperties{}
			}
			(*ap)[tokName] = to.Ptr(tokValue)
			tokName = ""
		}
	}
	return nil
}
"#,
    );
    text
}

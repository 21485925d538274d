//! Style inspector across the selected elements

use crate::errors::EditorError;
use crate::node_tree::NodeId;
use crate::source_file::SourceFile;
use serde::Serialize;
use tracing::debug;
use twinspect_style::{same_or_mixed, AnyStyleKey, MaybeMixed, Style};

#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub elements: Vec<NodeId>,
    /// Every longhand, then every shorthand
    pub values: Vec<(AnyStyleKey, MaybeMixed<Option<String>>)>,
}

impl Inspection {
    pub fn get(&self, key: AnyStyleKey) -> MaybeMixed<Option<&str>> {
        self.values
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| match value {
                MaybeMixed::Value(value) => MaybeMixed::Value(value.as_deref()),
                MaybeMixed::Mixed => MaybeMixed::Mixed,
            })
            .unwrap_or(MaybeMixed::Value(None))
    }

    /// Keys that have a value or disagree
    pub fn present(&self) -> impl Iterator<Item = &(AnyStyleKey, MaybeMixed<Option<String>>)> {
        self.values
            .iter()
            .filter(|(_, value)| !matches!(value, MaybeMixed::Value(None)))
    }
}

#[derive(Debug, Serialize)]
struct InspectedValue<'a> {
    key: &'a str,
    value: Option<&'a str>,
    mixed: bool,
}

impl Serialize for Inspection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(None)?;
        for (key, value) in self.present() {
            seq.serialize_element(&InspectedValue {
                key: key.name(),
                value: match value {
                    MaybeMixed::Value(value) => value.as_deref(),
                    MaybeMixed::Mixed => None,
                },
                mixed: value.is_mixed(),
            })?;
        }
        seq.end()
    }
}

/// Read every key across the selected elements
pub fn inspect(file: &SourceFile) -> Result<Inspection, EditorError> {
    let elements = file.selected_elements();
    let styles = elements
        .iter()
        .map(|id| file.element_style(*id))
        .collect::<Result<Vec<Style>, _>>()?;

    let values = AnyStyleKey::all()
        .map(|key| (key, aggregate(&styles, key)))
        .collect();

    Ok(Inspection { elements, values })
}

fn aggregate(styles: &[Style], key: AnyStyleKey) -> MaybeMixed<Option<String>> {
    let mut values = Vec::with_capacity(styles.len());
    for style in styles {
        match style.get_any(key) {
            MaybeMixed::Value(value) => values.push(value),
            MaybeMixed::Mixed => return MaybeMixed::Mixed,
        }
    }
    match same_or_mixed(values) {
        MaybeMixed::Value(value) => MaybeMixed::Value(value.map(str::to_string)),
        MaybeMixed::Mixed => MaybeMixed::Mixed,
    }
}

/// Write `value` to every selected element, then regenerate once. `Mixed`
/// is ignored. Returns the number of elements that changed.
pub fn set(file: &mut SourceFile, key: AnyStyleKey, value: MaybeMixed<&str>) -> Result<usize, EditorError> {
    if value.is_mixed() {
        return Ok(0);
    }

    let mut changed = 0;
    for id in file.selected_elements() {
        let mut style = file.element_style(id)?;
        if style.set_any(key, value.clone()).is_empty() {
            continue;
        }
        file.set_element_style(id, &style)?;
        changed += 1;
    }

    if changed > 0 {
        file.update_code()?;
    }
    debug!(key = %key, elements = changed, "Set style");
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_file::EditorOptions;
    use twinspect_style::{ShorthandKey, StyleKey};

    const SOURCE: &str = r#"export default function A() {
  return <div><p className="mt-[1px] mr-[2px] mb-[1px] ml-[1px]" /><p className="mt-[1px]" /></div>;
}
"#;

    fn file_with_selection() -> (SourceFile, Vec<NodeId>) {
        let mut file = SourceFile::from_source("/A.tsx", SOURCE, EditorOptions::default()).unwrap();
        let div = file.tree().children(file.tree().components()[0])[0];
        let ps = file.tree().children(div).to_vec();
        for p in &ps {
            file.select(*p).unwrap();
        }
        (file, ps)
    }

    #[test]
    fn test_inspect_reports_mixed_across_elements() {
        let (file, _) = file_with_selection();
        let inspection = inspect(&file).unwrap();

        assert_eq!(inspection.get(StyleKey::MarginTop.into()), MaybeMixed::Value(Some("1px")));
        assert_eq!(inspection.get(StyleKey::MarginRight.into()), MaybeMixed::Mixed);
        assert_eq!(inspection.get(ShorthandKey::Margin.into()), MaybeMixed::Mixed);
        assert_eq!(inspection.get(StyleKey::Width.into()), MaybeMixed::Value(None));
    }

    #[test]
    fn test_set_shorthand_on_all_selected() {
        let (mut file, ps) = file_with_selection();

        let changed = set(&mut file, ShorthandKey::Margin.into(), MaybeMixed::Value("3px")).unwrap();
        assert_eq!(changed, 2);

        for p in ps {
            let style = file.element_style(p).unwrap();
            assert_eq!(style.shorthand(ShorthandKey::Margin), MaybeMixed::Value(Some("3px")));
        }
        assert_eq!(file.version(), 1);
        assert!(file.code().contains(r#"<p className="mt-[3px] mr-[3px] mb-[3px] ml-[3px]" />"#));
    }

    #[test]
    fn test_setting_mixed_changes_nothing() {
        let (mut file, _) = file_with_selection();

        assert_eq!(set(&mut file, ShorthandKey::Margin.into(), MaybeMixed::Mixed).unwrap(), 0);
        assert_eq!(file.version(), 0);
    }
}

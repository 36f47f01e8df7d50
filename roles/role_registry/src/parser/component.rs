//! Parsing of required component patterns and their intent filters.

use crate::error::{Result, RoleError};
use crate::model::{
    is_valid_mime_type, ComponentKind, IntentFilterPattern, RequiredComponent, CATEGORY_DEFAULT,
};

use super::cursor::Event;
use super::document::RolesParser;
use super::{
    ATTR_MIME_TYPE, ATTR_NAME, ATTR_PERMISSION, ATTR_SCHEME, TAG_ACTION, TAG_CATEGORY, TAG_DATA,
    TAG_INTENT_FILTER,
};

impl<'p, 'a, 'input: 'a> RolesParser<'p, 'a, 'input> {
    /// Parse a `<required-components>` section: any number of the four
    /// component kinds, unique by structural equality.
    pub(crate) fn parse_required_components(
        &mut self,
        role_name: &str,
    ) -> Result<Vec<RequiredComponent>> {
        let mut components: Vec<RequiredComponent> = Vec::new();

        let outer_depth = self.cursor.depth();
        loop {
            match self.cursor.advance() {
                Event::Eof => break,
                Event::End => {
                    if self.cursor.depth() <= outer_depth {
                        break;
                    }
                }
                Event::Start => match ComponentKind::from_element(self.cursor.name()) {
                    Some(kind) => {
                        if let Some(component) = self.parse_required_component(kind)? {
                            if components.contains(&component) {
                                self.duplicate(format!(
                                    "required component in role {}: {}",
                                    role_name, component
                                ))?;
                            } else {
                                components.push(component);
                            }
                        }
                    }
                    None => {
                        self.unknown_element()?;
                        self.cursor.skip_subtree();
                    }
                },
            }
        }

        Ok(components)
    }

    /// Parse one component element of the given kind: an optional
    /// `permission` attribute and exactly one `<intent-filter>` child.
    pub(crate) fn parse_required_component(
        &mut self,
        kind: ComponentKind,
    ) -> Result<Option<RequiredComponent>> {
        let permission = self.attribute(ATTR_PERMISSION);
        let mut intent_filter: Option<IntentFilterPattern> = None;

        let outer_depth = self.cursor.depth();
        loop {
            match self.cursor.advance() {
                Event::Eof => break,
                Event::End => {
                    if self.cursor.depth() <= outer_depth {
                        break;
                    }
                }
                Event::Start => {
                    if self.cursor.name() == TAG_INTENT_FILTER {
                        if intent_filter.is_some() {
                            self.duplicate(format!(
                                "<{}> in <{}>",
                                TAG_INTENT_FILTER,
                                kind.element_name()
                            ))?;
                            self.cursor.skip_subtree();
                        } else {
                            intent_filter = self.parse_intent_filter()?;
                        }
                    } else {
                        self.unknown_element()?;
                        self.cursor.skip_subtree();
                    }
                }
            }
        }

        match intent_filter {
            Some(intent_filter) => Ok(Some(RequiredComponent {
                kind,
                permission,
                intent_filter,
            })),
            None => {
                self.reporter.report(RoleError::MissingChild {
                    element: kind.element_name(),
                    child: TAG_INTENT_FILTER,
                })?;
                Ok(None)
            }
        }
    }

    /// Parse one `<intent-filter>`: exactly one `<action>`, any number of
    /// unique `<category>` entries, and at most one `<data>`.
    pub(crate) fn parse_intent_filter(&mut self) -> Result<Option<IntentFilterPattern>> {
        let mut action: Option<String> = None;
        let mut categories: Vec<String> = Vec::new();
        let mut has_data = false;
        let mut data_scheme: Option<String> = None;
        let mut data_mime_type: Option<String> = None;

        let outer_depth = self.cursor.depth();
        loop {
            match self.cursor.advance() {
                Event::Eof => break,
                Event::End => {
                    if self.cursor.depth() <= outer_depth {
                        break;
                    }
                }
                Event::Start => match self.cursor.name() {
                    TAG_ACTION => {
                        if action.is_some() {
                            self.duplicate(format!(
                                "<{}> in <{}>",
                                TAG_ACTION, TAG_INTENT_FILTER
                            ))?;
                            self.cursor.skip_subtree();
                        } else {
                            action = self.require_attribute(TAG_ACTION, ATTR_NAME)?;
                        }
                    }
                    TAG_CATEGORY => {
                        if let Some(category) = self.require_attribute(TAG_CATEGORY, ATTR_NAME)? {
                            // The default category is implicit on every
                            // filter and must not be declared.
                            if category == CATEGORY_DEFAULT {
                                self.reporter.report(RoleError::InvalidAttributeValue {
                                    element: TAG_CATEGORY,
                                    attribute: ATTR_NAME,
                                    value: category,
                                })?;
                            } else if categories.contains(&category) {
                                self.duplicate(format!("category: {}", category))?;
                            } else {
                                categories.push(category);
                            }
                        }
                    }
                    TAG_DATA => {
                        if has_data {
                            self.duplicate(format!("<{}> in <{}>", TAG_DATA, TAG_INTENT_FILTER))?;
                            self.cursor.skip_subtree();
                        } else {
                            has_data = true;
                            data_scheme = self.attribute(ATTR_SCHEME);
                            data_mime_type = self.attribute(ATTR_MIME_TYPE);
                            if let Some(mime_type) = &data_mime_type {
                                if !is_valid_mime_type(mime_type) {
                                    self.reporter.report(RoleError::InvalidAttributeValue {
                                        element: TAG_DATA,
                                        attribute: ATTR_MIME_TYPE,
                                        value: mime_type.clone(),
                                    })?;
                                    data_mime_type = None;
                                }
                            }
                        }
                    }
                    _ => {
                        self.unknown_element()?;
                        self.cursor.skip_subtree();
                    }
                },
            }
        }

        let Some(action) = action else {
            self.reporter.report(RoleError::MissingChild {
                element: TAG_INTENT_FILTER,
                child: TAG_ACTION,
            })?;
            return Ok(None);
        };

        Ok(Some(IntentFilterPattern {
            action,
            categories,
            data_scheme,
            data_mime_type,
        }))
    }
}

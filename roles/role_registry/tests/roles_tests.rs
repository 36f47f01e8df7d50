//! End-to-end tests over whole role definition documents.

use std::sync::Arc;

use role_registry::{
    load_roles, AppOpMode, ComponentKind, ParseMode, RoleError, RoleRegistry, StaticAuthority,
};

fn strict(document: &str, authority: &StaticAuthority) -> Result<role_registry::LoadedRoles, RoleError> {
    load_roles(document, authority, ParseMode::Strict)
}

fn lenient(document: &str, authority: &StaticAuthority) -> role_registry::LoadedRoles {
    load_roles(document, authority, ParseMode::Lenient).unwrap()
}

#[test]
fn test_permission_set_expansion() {
    let document = r#"
        <roles>
            <permission-set name="loc">
                <permission name="ACCESS_FINE_LOCATION" />
            </permission-set>
            <role name="nav" exclusive="true">
                <permissions>
                    <permission-set name="loc" />
                </permissions>
            </role>
        </roles>
    "#;
    let authority = StaticAuthority::new().with_permission("ACCESS_FINE_LOCATION");

    let loaded = strict(document, &authority).unwrap();
    assert_eq!(loaded.roles.len(), 1);

    let nav = &loaded.roles["nav"];
    assert!(nav.exclusive);
    assert_eq!(nav.permissions, vec!["ACCESS_FINE_LOCATION"]);
    assert!(nav.required_components.is_empty());
    assert!(nav.app_ops.is_empty());
    assert!(nav.preferred_activities.is_empty());
}

#[test]
fn test_overlapping_sets_expand_to_union() {
    let document = r#"
        <roles>
            <permission-set name="one">
                <permission name="SHARED" />
                <permission name="ONLY_ONE" />
            </permission-set>
            <permission-set name="two">
                <permission name="SHARED" />
                <permission name="ONLY_TWO" />
            </permission-set>
            <role name="both" exclusive="false">
                <permissions>
                    <permission-set name="one" />
                    <permission-set name="two" />
                </permissions>
            </role>
        </roles>
    "#;
    let authority = StaticAuthority::new()
        .with_permission("SHARED")
        .with_permission("ONLY_ONE")
        .with_permission("ONLY_TWO");

    let loaded = strict(document, &authority).unwrap();
    assert_eq!(
        loaded.roles["both"].permissions,
        vec!["SHARED", "ONLY_ONE", "ONLY_TWO"]
    );
}

#[test]
fn test_inline_duplicate_permission_rejected() {
    let document = r#"
        <roles>
            <role name="dup" exclusive="false">
                <permissions>
                    <permission name="CAMERA" />
                    <permission name="CAMERA" />
                </permissions>
            </role>
        </roles>
    "#;
    let authority = StaticAuthority::permissive();

    assert!(matches!(
        strict(document, &authority),
        Err(RoleError::DuplicateDefinition(_))
    ));

    // Lenient keeps the first occurrence and records the repeat.
    let loaded = lenient(document, &authority);
    assert_eq!(loaded.roles["dup"].permissions, vec!["CAMERA"]);
    assert_eq!(loaded.diagnostics.len(), 1);
}

#[test]
fn test_unknown_permission_set_reference() {
    let document = r#"
        <roles>
            <role name="nav" exclusive="true">
                <permissions>
                    <permission-set name="never-defined" />
                </permissions>
            </role>
        </roles>
    "#;
    let authority = StaticAuthority::permissive();

    assert_eq!(
        strict(document, &authority).unwrap_err(),
        RoleError::UnresolvedReference("never-defined".to_string())
    );
}

#[test]
fn test_duplicate_role_names() {
    let document = r#"
        <roles>
            <role name="nav" exclusive="true" />
            <role name="nav" exclusive="false" />
        </roles>
    "#;
    let authority = StaticAuthority::permissive();

    assert!(matches!(
        strict(document, &authority),
        Err(RoleError::DuplicateDefinition(_))
    ));

    // Lenient keeps the first definition.
    let loaded = lenient(document, &authority);
    assert!(loaded.roles["nav"].exclusive);
    assert_eq!(loaded.diagnostics.len(), 1);
}

#[test]
fn test_invalid_exclusive_value() {
    let document = r#"
        <roles>
            <role name="nav" exclusive="maybe" />
        </roles>
    "#;
    let authority = StaticAuthority::permissive();

    assert!(matches!(
        strict(document, &authority),
        Err(RoleError::InvalidAttributeValue {
            attribute: "exclusive",
            ..
        })
    ));

    // Lenient drops the whole role.
    let loaded = lenient(document, &authority);
    assert!(loaded.roles.is_empty());
    assert_eq!(loaded.diagnostics.len(), 1);
}

#[test]
fn test_missing_role_name() {
    let document = r#"
        <roles>
            <role exclusive="true" />
        </roles>
    "#;
    let authority = StaticAuthority::permissive();

    assert!(matches!(
        strict(document, &authority),
        Err(RoleError::MissingAttribute {
            element: "role",
            attribute: "name",
        })
    ));
}

#[test]
fn test_required_components_and_preferred_activity() {
    let document = r#"
        <roles>
            <role name="browser" exclusive="false">
                <required-components>
                    <activity>
                        <intent-filter>
                            <action name="android.intent.action.VIEW" />
                            <category name="android.intent.category.BROWSABLE" />
                            <data scheme="https" />
                        </intent-filter>
                    </activity>
                    <service permission="BIND_FAST_SERVICE">
                        <intent-filter>
                            <action name="android.service.FAST" />
                        </intent-filter>
                    </service>
                </required-components>
                <preferred-activities>
                    <preferred-activity>
                        <activity>
                            <intent-filter>
                                <action name="android.intent.action.VIEW" />
                                <category name="android.intent.category.BROWSABLE" />
                                <data scheme="https" />
                            </intent-filter>
                        </activity>
                        <intent-filter>
                            <action name="android.intent.action.VIEW" />
                        </intent-filter>
                    </preferred-activity>
                </preferred-activities>
            </role>
        </roles>
    "#;
    let authority = StaticAuthority::permissive();

    let loaded = strict(document, &authority).unwrap();
    let browser = &loaded.roles["browser"];

    assert_eq!(browser.required_components.len(), 2);
    assert_eq!(browser.required_components[0].kind, ComponentKind::Activity);
    assert_eq!(
        browser.required_components[0].intent_filter.data_scheme.as_deref(),
        Some("https")
    );
    assert_eq!(browser.required_components[1].kind, ComponentKind::Service);
    assert_eq!(
        browser.required_components[1].permission.as_deref(),
        Some("BIND_FAST_SERVICE")
    );

    assert_eq!(browser.preferred_activities.len(), 1);
    assert_eq!(
        browser.preferred_activities[0].activity,
        browser.required_components[0]
    );
}

#[test]
fn test_unbound_preferred_activity() {
    let document = r#"
        <roles>
            <role name="browser" exclusive="false">
                <preferred-activities>
                    <preferred-activity>
                        <activity>
                            <intent-filter>
                                <action name="android.intent.action.VIEW" />
                            </intent-filter>
                        </activity>
                        <intent-filter>
                            <action name="android.intent.action.VIEW" />
                        </intent-filter>
                    </preferred-activity>
                </preferred-activities>
            </role>
        </roles>
    "#;
    let authority = StaticAuthority::permissive();

    assert!(matches!(
        strict(document, &authority),
        Err(RoleError::UnboundPreferredActivity { .. })
    ));
}

#[test]
fn test_component_requires_exactly_one_intent_filter() {
    let authority = StaticAuthority::permissive();

    let missing = r#"
        <roles>
            <role name="r" exclusive="false">
                <required-components>
                    <activity />
                </required-components>
            </role>
        </roles>
    "#;
    assert!(matches!(
        strict(missing, &authority),
        Err(RoleError::MissingChild {
            element: "activity",
            child: "intent-filter",
        })
    ));

    let doubled = r#"
        <roles>
            <role name="r" exclusive="false">
                <required-components>
                    <receiver>
                        <intent-filter>
                            <action name="a.b.FIRST" />
                        </intent-filter>
                        <intent-filter>
                            <action name="a.b.SECOND" />
                        </intent-filter>
                    </receiver>
                </required-components>
            </role>
        </roles>
    "#;
    assert!(matches!(
        strict(doubled, &authority),
        Err(RoleError::DuplicateDefinition(_))
    ));
}

#[test]
fn test_mime_type_validation() {
    let authority = StaticAuthority::permissive();
    let template = |mime: &str| {
        format!(
            r#"
            <roles>
                <role name="viewer" exclusive="false">
                    <required-components>
                        <activity>
                            <intent-filter>
                                <action name="android.intent.action.VIEW" />
                                <data mimeType="{mime}" />
                            </intent-filter>
                        </activity>
                    </required-components>
                </role>
            </roles>
            "#
        )
    };

    let loaded = strict(&template("text/plain"), &authority).unwrap();
    assert_eq!(
        loaded.roles["viewer"].required_components[0]
            .intent_filter
            .data_mime_type
            .as_deref(),
        Some("text/plain")
    );

    assert!(matches!(
        strict(&template("textplain"), &authority),
        Err(RoleError::InvalidAttributeValue {
            attribute: "mimeType",
            ..
        })
    ));
}

#[test]
fn test_default_category_rejected() {
    let document = r#"
        <roles>
            <role name="viewer" exclusive="false">
                <required-components>
                    <activity>
                        <intent-filter>
                            <action name="android.intent.action.VIEW" />
                            <category name="android.intent.category.DEFAULT" />
                        </intent-filter>
                    </activity>
                </required-components>
            </role>
        </roles>
    "#;
    let authority = StaticAuthority::permissive();

    assert!(matches!(
        strict(document, &authority),
        Err(RoleError::InvalidAttributeValue {
            element: "category",
            ..
        })
    ));

    // Lenient drops the reserved category but keeps the component.
    let loaded = lenient(document, &authority);
    assert!(loaded.roles["viewer"].required_components[0]
        .intent_filter
        .categories
        .is_empty());
    assert_eq!(loaded.diagnostics.len(), 1);
}

#[test]
fn test_app_ops() {
    let document = r#"
        <roles>
            <role name="assistant" exclusive="true">
                <app-ops>
                    <app-op name="android:fine_location" mode="foreground" />
                    <app-op name="android:monitor_location" mode="allowed" />
                </app-ops>
            </role>
        </roles>
    "#;
    let authority = StaticAuthority::new()
        .with_operation("android:fine_location", None)
        .with_operation("android:monitor_location", None);

    let loaded = strict(document, &authority).unwrap();
    let ops = &loaded.roles["assistant"].app_ops;
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0].name, "android:fine_location");
    assert_eq!(ops[0].mode, AppOpMode::Foreground);
    assert_eq!(ops[1].mode, AppOpMode::Allowed);
}

#[test]
fn test_app_op_invalid_mode() {
    let document = r#"
        <roles>
            <role name="assistant" exclusive="true">
                <app-ops>
                    <app-op name="android:fine_location" mode="granted" />
                </app-ops>
            </role>
        </roles>
    "#;
    let authority = StaticAuthority::permissive();

    assert!(matches!(
        strict(document, &authority),
        Err(RoleError::InvalidAttributeValue {
            element: "app-op",
            attribute: "mode",
            ..
        })
    ));
}

#[test]
fn test_app_op_name_checked_in_strict_mode_only() {
    let document = r#"
        <roles>
            <role name="assistant" exclusive="true">
                <app-ops>
                    <app-op name="android:not_an_op" mode="allowed" />
                </app-ops>
            </role>
        </roles>
    "#;
    let authority = StaticAuthority::new();

    assert_eq!(
        strict(document, &authority).unwrap_err(),
        RoleError::UnknownOperation("android:not_an_op".to_string())
    );

    // The name-space check is a strict-mode-only development aid.
    let loaded = lenient(document, &authority);
    assert_eq!(loaded.roles["assistant"].app_ops.len(), 1);
    assert!(loaded.diagnostics.is_empty());
}

#[test]
fn test_app_op_with_backing_permission() {
    let document = r#"
        <roles>
            <role name="camera" exclusive="false">
                <app-ops>
                    <app-op name="android:camera" mode="allowed" />
                </app-ops>
            </role>
        </roles>
    "#;
    let authority = StaticAuthority::permissive()
        .with_operation("android:camera", Some("android.permission.CAMERA"));

    assert_eq!(
        strict(document, &authority).unwrap_err(),
        RoleError::OperationHasPermission("android:camera".to_string())
    );
}

#[test]
fn test_duplicate_section_in_role() {
    let document = r#"
        <roles>
            <role name="nav" exclusive="true">
                <permissions>
                    <permission name="ONE" />
                </permissions>
                <permissions>
                    <permission name="TWO" />
                </permissions>
            </role>
        </roles>
    "#;
    let authority = StaticAuthority::permissive();

    assert!(matches!(
        strict(document, &authority),
        Err(RoleError::DuplicateDefinition(_))
    ));

    // Lenient keeps the first section and skips the second.
    let loaded = lenient(document, &authority);
    assert_eq!(loaded.roles["nav"].permissions, vec!["ONE"]);
}

#[test]
fn test_unknown_element() {
    let document = r#"
        <roles>
            <gadget name="x" />
        </roles>
    "#;
    let authority = StaticAuthority::permissive();

    assert_eq!(
        strict(document, &authority).unwrap_err(),
        RoleError::UnknownElement("gadget".to_string())
    );
}

#[test]
fn test_missing_root() {
    let authority = StaticAuthority::permissive();

    // Strict mode stops at the unrecognized top-level element before it
    // can tell the root grouping element is absent.
    assert_eq!(
        strict("<norole/>", &authority).unwrap_err(),
        RoleError::UnknownElement("norole".to_string())
    );

    // Lenient mode skips past it and then reports the missing root too.
    let loaded = lenient("<norole/>", &authority);
    assert!(loaded.roles.is_empty());
    assert_eq!(
        loaded.diagnostics,
        vec![
            RoleError::UnknownElement("norole".to_string()),
            RoleError::MissingRoot,
        ]
    );
}

#[test]
fn test_malformed_document_fatal_in_lenient_mode() {
    let authority = StaticAuthority::permissive();
    let result = load_roles("<roles><role</roles>", &authority, ParseMode::Lenient);
    assert!(matches!(result, Err(RoleError::MalformedDocument(_))));
}

#[test]
fn test_registry_end_to_end() {
    let document = r#"
        <roles>
            <permission-set name="loc">
                <permission name="ACCESS_FINE_LOCATION" />
            </permission-set>
            <role name="nav" exclusive="true">
                <permissions>
                    <permission-set name="loc" />
                </permissions>
            </role>
        </roles>
    "#;
    let authority = Arc::new(StaticAuthority::new().with_permission("ACCESS_FINE_LOCATION"));
    let registry = RoleRegistry::new(document, authority, ParseMode::Strict);

    let first = registry.roles().unwrap();
    let second = registry.roles().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.roles["nav"].permissions, vec!["ACCESS_FINE_LOCATION"]);
}

use insta::assert_snapshot;
use jv_lombok::{
    CollectingProblemSink, ElementKind, EmptyProblemSink, ProcessorRegistry, QuickFix,
    VirtualElement,
};
use jv_lombok_ast::{
    AnnotationModel, AnnotationValue, ClassKind, ClassModel, FieldModel, JavaType, MethodModel,
    NodeId, SourceTree, Visibility,
};

fn lower(model: ClassModel) -> (SourceTree, NodeId) {
    let tree = SourceTree::from_models(&[model]).expect("valid model");
    let root = tree.top_level_classes()[0];
    (tree, root)
}

fn point(annotation: AnnotationModel) -> ClassModel {
    ClassModel::new("Point")
        .in_package("geo")
        .annotated(annotation)
        .with_field(FieldModel::new("x", JavaType::int()))
        .with_field(FieldModel::new("name", JavaType::string()))
}

fn member_named<'e>(elements: &'e [VirtualElement], name: &str) -> &'e jv_lombok::VirtualMember {
    elements
        .iter()
        .filter_map(VirtualElement::as_member)
        .find(|member| member.name == name)
        .unwrap_or_else(|| panic!("no member named {}", name))
}

#[test]
fn all_args_constructor_assigns_every_field() {
    let (tree, class) = lower(point(AnnotationModel::new("lombok.AllArgsConstructor")));
    let elements = ProcessorRegistry::new().augment(&tree, class, ElementKind::Constructor);
    assert_eq!(
        elements[0].to_java_source(),
        "public Point(final int x, final java.lang.String name) {\n    this.x = x;\n    this.name = name;\n}\n"
    );
}

#[test]
fn all_args_constructor_with_static_name() {
    let annotation = AnnotationModel::new("lombok.AllArgsConstructor")
        .with("staticName", AnnotationValue::string("of"));
    let (tree, class) = lower(point(annotation));
    let elements = ProcessorRegistry::new().process(&tree, class);
    assert_eq!(elements.len(), 2);

    let constructor = elements[0].as_member().unwrap();
    assert_eq!(constructor.modifiers.visibility, Visibility::Private);
    assert_eq!(
        elements[1].to_java_source(),
        "public static geo.Point of(final int x, final java.lang.String name) {\n    return new geo.Point(x, name);\n}\n"
    );
}

#[test]
fn all_args_constructor_access_levels() {
    let none = AnnotationModel::new("lombok.AllArgsConstructor")
        .with("access", AnnotationValue::enum_constant("AccessLevel.NONE"));
    let (tree, class) = lower(point(none));
    let registry = ProcessorRegistry::new();
    assert!(registry.process(&tree, class).is_empty());
    assert!(registry.verify_class(&tree, class).is_empty());

    let protected = AnnotationModel::new("lombok.AllArgsConstructor")
        .with("access", AnnotationValue::enum_constant("AccessLevel.PROTECTED"));
    let (tree, class) = lower(point(protected));
    let elements = registry.process(&tree, class);
    assert_eq!(
        elements[0].as_member().unwrap().modifiers.visibility,
        Visibility::Protected
    );

    let (tree, class) = lower(
        point(AnnotationModel::new("lombok.AllArgsConstructor")).with_kind(ClassKind::Enum),
    );
    let elements = registry.process(&tree, class);
    assert_eq!(
        elements[0].as_member().unwrap().modifiers.visibility,
        Visibility::Private
    );
}

#[test]
fn all_args_constructor_conflict_is_an_error() {
    let model = point(AnnotationModel::new("lombok.AllArgsConstructor")).with_method(
        MethodModel::constructor("Point")
            .with_parameter("x", JavaType::int())
            .with_parameter("name", JavaType::reference("String")),
    );
    let (tree, class) = lower(model);
    let registry = ProcessorRegistry::new();
    assert!(registry.process(&tree, class).is_empty());

    let problems = registry.verify_class(&tree, class);
    assert_eq!(problems.len(), 1);
    assert!(problems[0].is_error());
    assert_snapshot!(&problems[0].message, @"Constructor with 2 parameters already defined");
}

#[test]
fn equals_hash_code_and_can_equal() {
    let (tree, class) = lower(point(AnnotationModel::new("lombok.EqualsAndHashCode")));
    let elements = ProcessorRegistry::new().process(&tree, class);
    let names: Vec<&str> = elements.iter().map(VirtualElement::name).collect();
    assert_eq!(names, vec!["equals", "hashCode", "canEqual"]);

    let equals = r#"public boolean equals(final java.lang.Object o) {
    if (o == this) return true;
    if (!(o instanceof geo.Point)) return false;
    final geo.Point other = (geo.Point) o;
    if (!other.canEqual((java.lang.Object) this)) return false;
    if (this.x != other.x) return false;
    final java.lang.Object this$name = this.name;
    final java.lang.Object other$name = other.name;
    if (this$name == null ? other$name != null : !this$name.equals(other$name)) return false;
    return true;
}
"#;
    assert_eq!(elements[0].to_java_source(), equals);

    let hash_code = r#"public int hashCode() {
    final int PRIME = 59;
    int result = 1;
    result = result * PRIME + this.x;
    final java.lang.Object $name = this.name;
    result = result * PRIME + ($name == null ? 43 : $name.hashCode());
    return result;
}
"#;
    assert_eq!(elements[1].to_java_source(), hash_code);

    assert_eq!(
        elements[2].to_java_source(),
        "protected boolean canEqual(final java.lang.Object other) {\n    return other instanceof geo.Point;\n}\n"
    );
}

#[test]
fn hash_terms_follow_field_types() {
    let model = ClassModel::new("Sample")
        .annotated(AnnotationModel::new("lombok.EqualsAndHashCode"))
        .with_field(FieldModel::new("flag", JavaType::boolean()))
        .with_field(FieldModel::new("count", JavaType::primitive("long")))
        .with_field(FieldModel::new("ratio", JavaType::primitive("double")))
        .with_field(FieldModel::new("weight", JavaType::primitive("float")))
        .with_field(FieldModel::new("tags", JavaType::array(JavaType::string(), 1)))
        .with_field(FieldModel::new("data", JavaType::array(JavaType::int(), 1)))
        .with_field(FieldModel::new("cache", JavaType::object()).with_transient());
    let (tree, class) = lower(model);
    let elements = ProcessorRegistry::new().process(&tree, class);

    let expected = r#"public int hashCode() {
    final int PRIME = 59;
    int result = 1;
    result = result * PRIME + (this.flag ? 79 : 97);
    final long $count = this.count;
    result = result * PRIME + (int) ($count >>> 32 ^ $count);
    final long $ratio = java.lang.Double.doubleToLongBits(this.ratio);
    result = result * PRIME + (int) ($ratio >>> 32 ^ $ratio);
    result = result * PRIME + java.lang.Float.floatToIntBits(this.weight);
    result = result * PRIME + java.util.Arrays.deepHashCode(this.tags);
    result = result * PRIME + java.util.Arrays.hashCode(this.data);
    return result;
}
"#;
    assert_eq!(member_named(&elements, "hashCode").to_java_source(), expected);

    let equals = member_named(&elements, "equals").to_java_source();
    assert!(equals.contains("if (java.lang.Double.compare(this.ratio, other.ratio) != 0) return false;"));
    assert!(equals.contains("if (java.lang.Float.compare(this.weight, other.weight) != 0) return false;"));
    assert!(equals.contains("if (!java.util.Arrays.deepEquals(this.tags, other.tags)) return false;"));
    assert!(equals.contains("if (!java.util.Arrays.equals(this.data, other.data)) return false;"));
    assert!(!equals.contains("cache"));
}

#[test]
fn equals_uses_getters_unless_told_not_to() {
    let with_getter = |annotation: AnnotationModel| {
        point(annotation).with_method(MethodModel::method("getName", JavaType::string()))
    };

    let (tree, class) = lower(with_getter(AnnotationModel::new("lombok.EqualsAndHashCode")));
    let elements = ProcessorRegistry::new().process(&tree, class);
    let equals = member_named(&elements, "equals").to_java_source();
    assert!(equals.contains("final java.lang.Object this$name = this.getName();"));
    assert!(equals.contains("final java.lang.Object other$name = other.getName();"));

    let (tree, class) = lower(with_getter(
        AnnotationModel::new("lombok.EqualsAndHashCode")
            .with("doNotUseGetters", AnnotationValue::boolean(true)),
    ));
    let elements = ProcessorRegistry::new().process(&tree, class);
    assert!(!member_named(&elements, "equals").to_java_source().contains("getName()"));
}

#[test]
fn final_class_without_super_skips_can_equal() {
    let mut model = point(AnnotationModel::new("lombok.EqualsAndHashCode"));
    model.modifiers.is_final = true;
    let (tree, class) = lower(model);
    let elements = ProcessorRegistry::new().process(&tree, class);
    let names: Vec<&str> = elements.iter().map(VirtualElement::name).collect();
    assert_eq!(names, vec!["equals", "hashCode"]);
    assert!(!elements[0].to_java_source().contains("canEqual"));
}

#[test]
fn call_super_adds_super_calls() {
    let model = point(
        AnnotationModel::new("lombok.EqualsAndHashCode")
            .with("callSuper", AnnotationValue::boolean(true)),
    )
    .extending(JavaType::reference("geo.Shape"));
    let (tree, class) = lower(model);
    let registry = ProcessorRegistry::new();
    assert!(registry.verify_class(&tree, class).is_empty());

    let elements = registry.process(&tree, class);
    assert!(member_named(&elements, "equals")
        .to_java_source()
        .contains("if (!super.equals(o)) return false;"));
    assert!(member_named(&elements, "hashCode")
        .to_java_source()
        .contains("result = result * PRIME + super.hashCode();"));
}

#[test]
fn call_super_warning_fires_once_with_both_fixes() {
    let model = point(
        AnnotationModel::new("lombok.EqualsAndHashCode")
            .with("exclude", AnnotationValue::strings(["name"])),
    )
    .extending(JavaType::reference("geo.Shape"));
    let (tree, class) = lower(model);
    let registry = ProcessorRegistry::new();
    let annotation = tree.annotations_of(class)[0];

    let problems = registry.verify_class(&tree, class);
    assert_eq!(problems.len(), 1);
    assert!(!problems[0].is_error());
    assert!(problems[0].message.starts_with("Generating equals/hashCode implementation"));
    assert_eq!(
        problems[0].fixes,
        vec![
            QuickFix::change_annotation_parameter(annotation, "callSuper", Some("true".into())),
            QuickFix::change_annotation_parameter(annotation, "callSuper", Some("false".into())),
        ]
    );
    // advisory only
    assert_eq!(registry.process(&tree, class).len(), 3);
}

#[test]
fn call_super_without_super_class_is_pointless() {
    let (tree, class) = lower(point(
        AnnotationModel::new("lombok.EqualsAndHashCode")
            .with("callSuper", AnnotationValue::boolean(true)),
    ));
    let registry = ProcessorRegistry::new();
    let problems = registry.verify_class(&tree, class);
    assert_eq!(problems.len(), 1);
    assert!(problems[0].is_error());
    assert!(registry.process(&tree, class).is_empty());
}

#[test]
fn existing_equals_blocks_both_methods() {
    let model = point(AnnotationModel::new("lombok.EqualsAndHashCode")).with_method(
        MethodModel::method("equals", JavaType::boolean()).with_parameter("o", JavaType::object()),
    );
    let (tree, class) = lower(model);
    let registry = ProcessorRegistry::new();
    assert!(registry.process(&tree, class).is_empty());
    assert_eq!(registry.verify_class(&tree, class).len(), 1);
}

#[test]
fn to_string_lists_fields() {
    let (tree, class) = lower(point(AnnotationModel::new("lombok.ToString")));
    let elements = ProcessorRegistry::new().process(&tree, class);
    assert_eq!(
        elements[0].to_java_source(),
        "public java.lang.String toString() {\n    return \"Point(x=\" + this.x + \", name=\" + this.name + \")\";\n}\n"
    );
}

#[test]
fn to_string_options() {
    let annotation = AnnotationModel::new("lombok.ToString")
        .with("callSuper", AnnotationValue::boolean(true))
        .with("includeFieldNames", AnnotationValue::boolean(false))
        .with("exclude", AnnotationValue::string("name"));
    let model = point(annotation)
        .extending(JavaType::reference("geo.Shape"))
        .with_field(FieldModel::new("data", JavaType::array(JavaType::int(), 1)));
    let (tree, class) = lower(model);
    let elements = ProcessorRegistry::new().process(&tree, class);
    let body = elements[0].as_member().unwrap().body.clone().unwrap();
    assert_snapshot!(
        jv_lombok_codegen::render_block(&body, "    ").trim_end(),
        @r#"return "Point(" + super.toString() + ", " + this.x + ", " + java.util.Arrays.toString(this.data) + ")";"#
    );
}

#[test]
fn to_string_of_nested_and_empty_classes() {
    let model = ClassModel::new("Outer").with_inner_class(
        ClassModel::new("Inner").annotated(AnnotationModel::new("lombok.ToString")),
    );
    let (tree, outer) = lower(model);
    let inner = tree.class(outer).unwrap().inner_classes[0];
    let elements = ProcessorRegistry::new().process(&tree, inner);
    assert!(elements[0].to_java_source().contains("return \"Outer.Inner()\";"));
}

#[test]
fn to_string_reports_unknown_fields_and_existing_method() {
    let annotation = AnnotationModel::new("lombok.ToString")
        .with("of", AnnotationValue::strings(["x", "missing"]));
    let (tree, class) = lower(point(annotation));
    let registry = ProcessorRegistry::new();
    let problems = registry.verify_class(&tree, class);
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].message, "The field 'missing' does not exist");
    // dangling names do not block generation
    assert_eq!(registry.process(&tree, class).len(), 1);

    let model = point(AnnotationModel::new("lombok.ToString"))
        .with_method(MethodModel::method("toString", JavaType::string()));
    let (tree, class) = lower(model);
    assert!(registry.process(&tree, class).is_empty());
    assert_eq!(
        registry.verify_class(&tree, class)[0].message,
        "Not generated 'toString()': A method with same name already exists"
    );
}

#[test]
fn validation_agrees_across_sinks_and_gates_generation() {
    let models = vec![
        point(AnnotationModel::new("lombok.AllArgsConstructor")),
        point(AnnotationModel::new("lombok.ToString")),
        point(AnnotationModel::new("lombok.EqualsAndHashCode")),
        point(AnnotationModel::new("lombok.Builder")),
        point(AnnotationModel::new("lombok.EqualsAndHashCode"))
            .extending(JavaType::reference("geo.Shape")),
        point(
            AnnotationModel::new("lombok.EqualsAndHashCode")
                .with("callSuper", AnnotationValue::boolean(true)),
        ),
        point(AnnotationModel::new("lombok.ToString").with("exclude", AnnotationValue::string("zz"))),
        point(AnnotationModel::new("lombok.ToString"))
            .with_method(MethodModel::method("toString", JavaType::string())),
        point(AnnotationModel::new("lombok.Builder")).with_kind(ClassKind::Interface),
        point(AnnotationModel::new("lombok.AllArgsConstructor")).with_kind(ClassKind::Record),
    ];
    let registry = ProcessorRegistry::new();

    for model in models {
        let label = format!("{:?}", model.annotations[0]);
        let (tree, class) = lower(model);
        let annotation = tree.annotations_of(class)[0].id;

        let quiet = registry.validate_annotation(&tree, annotation, &mut EmptyProblemSink);
        let mut sink = CollectingProblemSink::new();
        let loud = registry.validate_annotation(&tree, annotation, &mut sink);
        assert_eq!(quiet, loud, "{}", label);
        if sink.has_errors() {
            assert!(!loud, "{}", label);
        }
        assert_eq!(!registry.process(&tree, class).is_empty(), loud, "{}", label);
    }
}

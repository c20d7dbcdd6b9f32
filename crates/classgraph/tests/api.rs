//! Integration tests for the public API

use classgraph::prelude::*;
use classgraph::{analyze, encode, generate, Modifier, Visibility};

#[test]
fn test_dog_extends_animal() {
    let result = analyze("class Animal {}\nclass Dog extends Animal {}").unwrap();

    let names: Vec<_> = result.entities.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Animal", "Dog"]);
    assert_eq!(
        result.relationships,
        vec![Relationship::new(RelationshipKind::Inheritance, "Dog", "Animal")]
    );

    let diagram = encode(&result, &EncodeOptions::default()).unwrap();
    assert!(diagram.diagram_text.contains("Dog --|> Animal"));
}

#[test]
fn test_top_level_declaration_count() {
    let source = "class A {}\ninterface B {}\nclass C {}\ninterface D {}\nfunction f() {}\nenum E { X }";
    let result = analyze(source).unwrap();

    let classifiers = result
        .entities
        .iter()
        .filter(|e| e.kind.is_classifier())
        .count();
    assert_eq!(classifiers, 4);
    assert_eq!(result.entities.len(), 6);
    assert_eq!(result.metadata.entity_count, 6);
}

#[test]
fn test_extends_and_implements_order() {
    let result = analyze("class X extends A implements B, C {}").unwrap();
    let edges: Vec<_> = result
        .relationships
        .iter()
        .map(|r| (r.kind, r.to.as_str(), r.label.as_deref()))
        .collect();

    assert_eq!(
        edges,
        vec![
            (RelationshipKind::Inheritance, "A", None),
            (RelationshipKind::Dependency, "B", Some("implements")),
            (RelationshipKind::Dependency, "C", Some("implements")),
        ]
    );
}

#[test]
fn test_interface_extends_multiple() {
    let result = analyze("interface Pet extends Named, Aged { }").unwrap();
    assert_eq!(result.entities[0].kind, EntityKind::Interface);
    assert_eq!(result.entities[0].extends, vec!["Named", "Aged"]);
    assert_eq!(result.relationships.len(), 2);
}

#[test]
fn test_member_extraction() {
    let source = r#"
class Account {
  id: string;
  private balance: number;
  protected readonly owner: string;
  static count: number;
  deposit(amount: number, note?: string): boolean { return true; }
  private audit() {}
}
"#;
    let result = analyze(source).unwrap();
    let account = result.entity("Account").unwrap();

    let properties: Vec<_> = account
        .properties
        .iter()
        .map(|p| (p.name.as_str(), p.type_text.as_str(), p.visibility))
        .collect();
    assert_eq!(
        properties,
        vec![
            ("id", "string", Visibility::Public),
            ("balance", "number", Visibility::Private),
            ("owner", "string", Visibility::Protected),
            ("count", "number", Visibility::Public),
        ]
    );
    assert!(account.properties[2].is_readonly);
    assert!(account.properties[3].is_static);

    let deposit = &account.methods[0];
    assert_eq!(deposit.name, "deposit");
    assert_eq!(deposit.return_type, "boolean");
    assert_eq!(deposit.parameters.len(), 2);
    assert!(!deposit.parameters[0].optional);
    assert!(deposit.parameters[1].optional);
    assert_eq!(deposit.parameters[1].type_text, "string");

    let audit = &account.methods[1];
    assert_eq!(audit.visibility, Visibility::Private);
    assert_eq!(audit.return_type, "void");
}

#[test]
fn test_include_private_false_removes_private_members_only() {
    let source = "class A {\n  a: number;\n  private b: number;\n  protected c: number;\n  private m() {}\n  n() {}\n}";
    let all = analyze(source).unwrap();
    let public_only = Analyzer::default()
        .with_options(AnalysisOptions::new().with_include_private(false))
        .analyze(source)
        .unwrap();

    let kept: Vec<_> = public_only.entities[0]
        .properties
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(kept, vec!["a", "c"]);
    assert_eq!(public_only.entities[0].methods.len(), 1);
    assert_eq!(all.entities[0].properties.len(), 3);
    assert_eq!(all.entities[0].methods.len(), 2);
}

#[test]
fn test_property_without_modifier_is_public() {
    let diagram = generate("class A { x: number; }", &EncodeOptions::default()).unwrap();
    assert!(diagram.diagram_text.contains("        +x: number\n"));
}

#[test]
fn test_abstract_class_and_methods() {
    let result = analyze("abstract class Shape {\n  abstract area(): number;\n}").unwrap();
    let shape = &result.entities[0];
    assert!(shape.modifiers.contains(&Modifier::Abstract));
    assert!(shape.methods[0].is_abstract);

    let diagram = encode(&result, &EncodeOptions::default()).unwrap();
    assert!(diagram.diagram_text.contains("<<abstract>>"));
    assert!(diagram.diagram_text.contains("+area(): number*"));
}

#[test]
fn test_function_and_enum_entities() {
    let result = analyze("function greet(name: string, loud?: boolean): string { return name; }\nenum Color { Red, Green = 'g' }").unwrap();

    let greet = &result.entities[0];
    assert_eq!(greet.kind, EntityKind::Function);
    assert_eq!(greet.methods.len(), 1);
    assert_eq!(greet.methods[0].name, "greet");
    assert_eq!(greet.methods[0].return_type, "string");
    assert_eq!(greet.methods[0].parameters.len(), 2);

    let color = &result.entities[1];
    assert_eq!(color.kind, EntityKind::Enum);
    let members: Vec<_> = color.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(members, vec!["Red", "Green"]);
    assert!(color.properties.iter().all(|p| p.type_text == "string | number"));
    assert!(color.methods.is_empty());
}

#[test]
fn test_exported_declarations_are_extracted() {
    let result = analyze("export class Dog {}\nexport interface Pet {}").unwrap();
    assert_eq!(result.entities.len(), 2);
    assert_eq!(result.exports, vec!["Dog", "Pet"]);
}

#[test]
fn test_imports_are_collected() {
    let result = analyze("import { A, B as C } from './mod';\nclass D extends A {}").unwrap();
    assert_eq!(result.imports.len(), 1);
    assert_eq!(result.imports[0].module, "./mod");
    assert_eq!(result.imports[0].names, vec!["A", "C"]);
}

#[test]
fn test_encoding_is_idempotent() {
    let source = "interface Pet { name: string; }\nclass Dog implements Pet { name: string; bark(times: number): void {} }";
    let options = EncodeOptions::new(DiagramType::Class)
        .with_direction(Direction::LeftRight)
        .with_title("Pets");

    let first = generate(source, &options).unwrap();
    let second = generate(source, &options).unwrap();
    assert_eq!(first.diagram_text, second.diagram_text);
}

#[test]
fn test_tsx_source() {
    let source = "class View { render() { return <div>{this.title}</div>; } }";
    let result = classgraph::analyze_with(source, SourceLanguage::Tsx, &AnalysisOptions::default())
        .unwrap();
    assert_eq!(result.entities[0].name, "View");
    assert_eq!(result.entities[0].methods[0].name, "render");
}

#[test]
fn test_result_serializes_to_json() {
    let result = analyze("class A { private x?: number; }").unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["entities"][0]["kind"], "class");
    assert_eq!(json["entities"][0]["properties"][0]["visibility"], "private");
    assert_eq!(json["metadata"]["language"], "typescript");

    let back: AnalysisResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}

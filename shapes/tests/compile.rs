//! End-to-end compilation tests: Turtle ontology in, shapes graph out.

use skg_shapes::serializer::{ntriples, turtle};
use skg_shapes::{compile_turtle, CompileOptions, NodeShape, PropertyShape, ShapesGraph, ValueConstraint};

const EX: &str = "http://example.org/";
const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
const SKG: &str = "http://skg.example/";

const ONTOLOGY: &str = r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix dc: <http://purl.org/dc/elements/1.1/> .
@prefix ex: <http://example.org/> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

ex:TestClass a owl:Class ;
    dc:description """The properties that can be used with this class are:
- ex:stringProp -[1]-> xsd:string
- ex:intProp -[0..1]-> xsd:integer
- ex:objectProp -[1..*]-> ex:OtherClass
""" .

ex:OtherClass a owl:Class .
"#;

fn compile(source: &str) -> ShapesGraph {
    compile_turtle(source, &CompileOptions::default()).unwrap()
}

fn shape<'g>(graph: &'g ShapesGraph, class: &str) -> &'g NodeShape {
    graph
        .find_by_target(&format!("{EX}{class}"))
        .unwrap_or_else(|| panic!("no shape for {class}"))
}

fn property<'s>(shape: &'s NodeShape, local: &str) -> &'s PropertyShape {
    let path = format!("{EX}{local}");
    shape
        .properties
        .iter()
        .find(|p| p.path.as_deref() == Some(path.as_str()))
        .unwrap_or_else(|| panic!("no property shape for {local}"))
}

#[test]
fn basic_shape_creation() {
    let graph = compile(ONTOLOGY);
    let shape = shape(&graph, "TestClass");
    assert_eq!(shape.id, "http://example.org/TestClassShape");
    assert_eq!(shape.target_class, "http://example.org/TestClass");
}

#[test]
fn property_constraints() {
    let graph = compile(ONTOLOGY);
    let shape = shape(&graph, "TestClass");
    assert_eq!(shape.properties.len(), 3);

    let string_prop = property(shape, "stringProp");
    assert_eq!(string_prop.min_count, Some(1));
    assert_eq!(string_prop.max_count, Some(1));
    assert_eq!(
        string_prop.value,
        Some(ValueConstraint::Datatype(format!("{XSD}string")))
    );

    let int_prop = property(shape, "intProp");
    assert_eq!(int_prop.min_count, Some(0));
    assert_eq!(int_prop.max_count, Some(1));
    assert_eq!(
        int_prop.value,
        Some(ValueConstraint::Datatype(format!("{XSD}integer")))
    );

    let object_prop = property(shape, "objectProp");
    assert_eq!(object_prop.min_count, Some(1));
    assert_eq!(object_prop.max_count, None);
    assert_eq!(
        object_prop.value,
        Some(ValueConstraint::Class(format!("{EX}OtherClass")))
    );
}

#[test]
fn no_description_no_shape() {
    let graph = compile(
        "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
         @prefix ex: <http://example.org/> .\n\
         ex:NoDescClass a owl:Class .\n",
    );
    assert!(graph.node_shapes.is_empty());

    let graph = compile(ONTOLOGY);
    assert!(graph.find_by_target("http://example.org/OtherClass").is_none());
}

#[test]
fn literal_target_uses_node_kind() {
    let graph = compile(
        r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix dc: <http://purl.org/dc/elements/1.1/> .
@prefix ex: <http://example.org/> .

ex:Note a owl:Class ;
    dc:description """Notes:
- ex:text -[1]-> rdfs:Literal
""" .
"#,
    );
    let prop = property(shape(&graph, "Note"), "text");
    assert_eq!(prop.min_count, Some(1));
    assert_eq!(prop.max_count, Some(1));
    assert_eq!(prop.value, Some(ValueConstraint::LiteralKind));
}

#[test]
fn only_valid_bullets_become_property_shapes() {
    let graph = compile(
        r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix dc: <http://purl.org/dc/elements/1.1/> .
@prefix ex: <http://example.org/> .

ex:Mixed a owl:Class ;
    dc:description """A class with commentary between bullets.
- ex:a -[1]-> xsd:string
- this bullet is just prose
Some interleaved remark.
* ex:b -[*]-> ex:Mixed
- ex:c -[one]-> xsd:string
- ex:d -[*..5]-> xsd:date
""" .
"#,
    );
    let shape = shape(&graph, "Mixed");
    assert_eq!(shape.properties.len(), 3);

    let b = property(shape, "b");
    assert_eq!((b.min_count, b.max_count), (None, None));
    assert_eq!(b.value, Some(ValueConstraint::Class(format!("{EX}Mixed"))));

    let d = property(shape, "d");
    assert_eq!((d.min_count, d.max_count), (None, Some(5)));
}

#[test]
fn unbound_prefixes_degrade_without_aborting_the_class() {
    let graph = compile(
        r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix dc: <http://purl.org/dc/elements/1.1/> .
@prefix ex: <http://example.org/> .

ex:Loose a owl:Class ;
    dc:description """Loose references:
- zz:mystery -[1]-> xsd:string
- ex:known -[0..2]-> zz:Elsewhere
- ex:plain -[1]-> ex:NotAClass
""" .
"#,
    );
    let shape = shape(&graph, "Loose");
    assert_eq!(shape.properties.len(), 3);

    let unbound_path = &shape.properties[0];
    assert_eq!(unbound_path.path, None);
    assert_eq!(unbound_path.min_count, Some(1));
    assert_eq!(
        unbound_path.value,
        Some(ValueConstraint::Datatype(format!("{XSD}string")))
    );

    let unbound_target = property(shape, "known");
    assert_eq!((unbound_target.min_count, unbound_target.max_count), (Some(0), Some(2)));
    assert_eq!(unbound_target.value, None);

    let unknown_target = property(shape, "plain");
    assert_eq!(unknown_target.value, None);
}

#[test]
fn custom_suffix_and_description_predicate() {
    let source = r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix dcterms: <http://purl.org/dc/terms/> .
@prefix ex: <http://example.org/> .

ex:Thing a owl:Class ;
    dcterms:description "- ex:name -[1]-> xsd:string" .
"#;
    assert!(compile(source).node_shapes.is_empty());

    let options = CompileOptions {
        shape_suffix: "NodeShape".to_owned(),
        description_predicates: vec!["http://purl.org/dc/terms/description".to_owned()],
    };
    let graph = compile_turtle(source, &options).unwrap();
    assert_eq!(graph.node_shapes[0].id, "http://example.org/ThingNodeShape");
    assert_eq!(graph.node_shapes[0].properties.len(), 1);
}

#[test]
fn output_prefixes_keep_sh_first_and_every_input_prefix() {
    let graph = compile(ONTOLOGY);
    let prefixes: Vec<_> = graph.prefixes.iter().map(|b| b.prefix.as_str()).collect();
    assert_eq!(prefixes[0], "sh");
    for expected in ["owl", "rdf", "dc", "ex", "xsd", "rdfs"] {
        assert!(prefixes.contains(&expected), "missing prefix {expected}");
    }
    assert_eq!(prefixes.iter().filter(|p| **p == "sh").count(), 1);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let first = compile(ONTOLOGY);
    let second = compile(ONTOLOGY);
    assert_eq!(first, second);
    assert_eq!(turtle::to_turtle(&first), turtle::to_turtle(&second));
    assert_eq!(ntriples::to_ntriples(&first), ntriples::to_ntriples(&second));
}

#[test]
fn turtle_output_reads_like_hand_written_shacl() {
    let text = turtle::to_turtle(&compile(ONTOLOGY));
    assert!(text.starts_with("@prefix sh: <http://www.w3.org/ns/shacl#> .\n"));
    assert!(text.contains("ex:TestClassShape\n    a sh:NodeShape ;\n    sh:targetClass ex:TestClass ;"));
    assert!(text.contains("sh:path ex:objectProp ;\n        sh:minCount 1 ;\n        sh:class ex:OtherClass"));
    assert!(text.contains("sh:datatype xsd:integer"));
}

#[test]
fn malformed_turtle_is_fatal() {
    let err = compile_turtle("ex:A a", &CompileOptions::default()).unwrap_err();
    assert!(matches!(err, skg_shapes::ShapesError::Parse(_)));
}

#[test]
fn prefixes_sharing_a_line_are_all_bound() {
    let graph = compile(
        r#"@prefix owl: <http://www.w3.org/2002/07/owl#> . @prefix dc: <http://purl.org/dc/elements/1.1/> .
@prefix ex: <http://example.org/> . @prefix sk: <http://skg.example/> .

ex:A a owl:Class ;
    dc:description """- sk:name -[1]-> xsd:string""" .
"#,
    );
    let shape = shape(&graph, "A");
    assert_eq!(shape.properties[0].path.as_deref(), Some(format!("{SKG}name").as_str()));

    let prefixes: Vec<_> = graph.prefixes.iter().map(|b| b.prefix.as_str()).collect();
    for expected in ["owl", "dc", "ex", "sk"] {
        assert!(prefixes.contains(&expected), "missing prefix {expected}");
    }
}

#[test]
fn single_quote_run_inside_long_string_keeps_later_prefixes() {
    let graph = compile(
        r#"@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix dc: <http://purl.org/dc/elements/1.1/> .
@prefix ex: <http://example.org/> .

ex:Note a owl:Class ;
    dc:description """Use ''' quoting.""" .

@prefix sk: <http://skg.example/> .

ex:A a owl:Class ;
    dc:description """- sk:name -[1]-> sk:Label""" .

sk:Label a owl:Class .
"#,
    );
    let name = &shape(&graph, "A").properties[0];
    assert_eq!(name.path.as_deref(), Some(format!("{SKG}name").as_str()));
    assert_eq!(name.value, Some(ValueConstraint::Class(format!("{SKG}Label"))));
}

#[test]
fn blank_description_yields_no_shape() {
    let graph = compile(
        r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix dc: <http://purl.org/dc/elements/1.1/> .
@prefix ex: <http://example.org/> .

ex:A a owl:Class ; dc:description "" .
ex:B a owl:Class ; dc:description """
   """ .
"#,
    );
    assert!(graph.node_shapes.is_empty());
}

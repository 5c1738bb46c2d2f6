use super::*;

#[test]
fn test_node() {
    let mut node = Node::new(10, 200);
    assert_eq!(node.is_red(), true);
    assert_eq!(node.is_black(), false);
    assert_eq!(node.is_leaf(), true);
    assert_eq!(node.only_child(), None);
    assert_eq!(node.key, 10);
    assert_eq!(node.value, 200);

    node.set_black();
    assert_eq!(node.is_black(), true);
    node.set_red();
    assert_eq!(node.color, Color::Red);

    node.set_value(-1);
    assert_eq!(node.value, -1);
    assert_eq!(node.key, 10);
}

#[test]
fn test_node_links() {
    let mut node = Node::new(1, 1);
    node.right = Some(7);
    node.parent = Some(3);
    assert_eq!(node.is_leaf(), false);
    assert_eq!(node.only_child(), Some(7));

    node.left = Some(5);
    assert_eq!(node.only_child(), None);

    node.detach();
    assert_eq!(node.is_leaf(), true);
    assert_eq!(node.parent, None);
    assert_eq!(Color::default(), Color::Red);
}

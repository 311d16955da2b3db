use avl_bst::{AvlTree, TreeError};

fn main() -> Result<(), TreeError> {
    let mut tree = AvlTree::new();
    tree.insert(0);
    tree.insert(1);
    tree.insert(2);
    tree.insert(2);
    tree.insert(3);
    tree.insert(4);
    tree.insert(5);
    assert_eq!(tree.len(), 6);
    assert!(tree.contains(&1));
    tree.remove(&1);
    assert!(!tree.contains(&1));

    println!("min = {}, max = {}", tree.find_min()?, tree.find_max()?);

    let copy = tree.clone();
    let mut moved = tree.take();
    moved.clear();
    assert!(tree.is_empty() && moved.is_empty());
    println!("{:?}", copy);

    match tree.find_min() {
        Err(TreeError::EmptyContainer) => println!("{}", TreeError::EmptyContainer),
        Ok(min) => println!("unexpected minimum {min}"),
    }
    Ok(())
}

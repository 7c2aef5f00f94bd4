use predicates::prelude::predicate;

mod common;

use common::TestWorld;

#[test]
fn commit_with_empty_index_is_rejected() {
    let world = TestWorld::initialized();

    world
        .run(&["commit", "-m", "nothing to see"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing staged"));

    // no object or ref mutation happened
    let objects: Vec<_> = std::fs::read_dir(world.path().join(".twig/objects"))
        .unwrap()
        .collect();
    assert!(objects.is_empty());
    assert_eq!(world.read_file(".twig/refs/heads/master").trim(), "");
}

#[test]
fn root_commit_is_marked_and_clears_the_index() {
    let world = TestWorld::initialized();
    world.write_file("file.txt", "content");
    world.run(&["add", "file.txt"]).assert().success();

    world
        .run(&["commit", "-m", "first commit"])
        .assert()
        .success()
        .stdout(
            predicate::str::is_match(r"^\[\(root-commit\) [0-9a-f]{7}\] first commit\n$").unwrap(),
        );

    assert_eq!(world.index_content(), "");
}

#[test]
fn second_commit_chains_to_the_first() {
    let world = TestWorld::initialized();
    world.write_file("a.txt", "a");
    world.stage_and_commit(&["a.txt"], "first");
    world.write_file("b.txt", "b");
    world.run(&["add", "b.txt"]).assert().success();

    world
        .run(&["commit", "-m", "second"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[[0-9a-f]{7}\] second\n$").unwrap());

    let digests = world.log_digests();
    assert_eq!(digests.len(), 2);

    // the newest commit declares the older one as parent
    let newest = world.cat_file(&digests[0]);
    assert!(newest.contains(&format!("parent {}", digests[1])));
    let oldest = world.cat_file(&digests[1]);
    assert!(!oldest.contains("parent "));
}

#[test]
fn commit_advances_the_current_branch_ref() {
    let world = TestWorld::initialized();
    world.write_file("file.txt", "content");
    world.stage_and_commit(&["file.txt"], "advance");

    assert_eq!(
        world.read_file(".twig/refs/heads/master").trim(),
        world.head_digest()
    );
    // HEAD stays symbolic
    assert_eq!(world.head_content(), "ref: refs/heads/master");
}

#[test]
fn untouched_files_carry_forward_into_the_next_tree() {
    let world = TestWorld::initialized();
    world.write_file("a.txt", "a");
    world.stage_and_commit(&["a.txt"], "first");
    world.write_file("b.txt", "b");
    world.stage_and_commit(&["b.txt"], "second");

    // the second commit's tree lists both files
    let commit = world.cat_file(&world.head_digest());
    let tree_digest = commit
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("tree "))
        .expect("commit payload missing tree line");

    let tree = world.cat_file(tree_digest);
    assert!(tree.contains(" a.txt blob"));
    assert!(tree.contains(" b.txt blob"));
}

#[test]
fn identical_snapshots_produce_identical_tree_digests() {
    let tree_digest_of = |paths: &[(&str, &str)]| {
        let world = TestWorld::initialized();
        for (path, content) in paths {
            world.write_file(path, content);
        }
        for (path, _) in paths {
            world.run(&["add", path]).assert().success();
        }
        world.run(&["commit", "-m", "snapshot"]).assert().success();

        let commit = world.cat_file(&world.head_digest());
        commit
            .lines()
            .next()
            .and_then(|line| line.strip_prefix("tree "))
            .expect("commit payload missing tree line")
            .to_string()
    };

    // staging order must not affect the resulting tree digest
    let forward = tree_digest_of(&[("a.txt", "a"), ("dir/b.txt", "b"), ("dir/c.txt", "c")]);
    let backward = tree_digest_of(&[("dir/c.txt", "c"), ("dir/b.txt", "b"), ("a.txt", "a")]);

    assert_eq!(forward, backward);
}

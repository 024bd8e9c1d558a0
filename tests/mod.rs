mod helpers;

#[test]
fn fixtures_are_present_and_readable() {
    let mgi = helpers::read_fixture("mgi_assoc.txt");
    let uniprot = helpers::read_fixture("uniprot_assoc.txt");

    assert!(mgi.starts_with(b"MGI:1\t"));
    assert!(uniprot.starts_with(b"P1\t"));
    assert!(helpers::read_fixture("mgi_uniprot.txt").starts_with(b"MGI\tSWISS-PROT"));
}
